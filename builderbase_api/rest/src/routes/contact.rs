use std::sync::Arc;

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use builderbase_core_contact_contracts::{ContactFeatureService, ContactSubmitError};
use serde_json::{Map, Value};
use tracing::debug;

use super::{error, internal_server_error};
use crate::models::contact::{ApiContactForm, ApiContactResponse};

pub const SUCCESS_MESSAGE: &str = "Message sent successfully! We'll get back to you soon.";

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(submit))
        .with_state(service)
}

/// The body is parsed as a JSON object regardless of the `Content-Type`
/// header.
async fn submit(service: State<Arc<impl ContactFeatureService>>, body: Bytes) -> Response {
    let form = match serde_json::from_slice::<Map<String, Value>>(&body)
        .and_then(|fields| serde_json::from_value::<ApiContactForm>(Value::Object(fields)))
        .context("Failed to parse contact form")
    {
        Ok(form) => form,
        Err(err) => return internal_server_error(err),
    };

    match service.submit(form.into()).await {
        Ok(report) => {
            debug!(delivered = ?report.delivered, failed = ?report.failed, "contact form submitted");
            Json(ApiContactResponse {
                success: true,
                message: SUCCESS_MESSAGE,
            })
            .into_response()
        }
        Err(ContactSubmitError::MissingFields) => {
            error(StatusCode::BAD_REQUEST, "Missing required fields")
        }
        Err(ContactSubmitError::InvalidEmail) => {
            error(StatusCode::BAD_REQUEST, "Invalid email format")
        }
    }
}
