use std::sync::Arc;

use axum::{extract::State, routing, Json, Router};
use builderbase_core_health_contracts::HealthFeatureService;

use crate::models::health::ApiHealthStatus;

pub fn router(service: Arc<impl HealthFeatureService>) -> Router<()> {
    Router::new()
        .route("/health", routing::get(health))
        .with_state(service)
}

async fn health(service: State<Arc<impl HealthFeatureService>>) -> Json<ApiHealthStatus> {
    Json(service.get_status().await.into())
}
