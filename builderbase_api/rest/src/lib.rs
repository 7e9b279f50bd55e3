use std::{net::IpAddr, sync::Arc};

use anyhow::Context;
use axum::{http::HeaderValue, Router};
use builderbase_core_contact_contracts::ContactFeatureService;
use builderbase_core_health_contracts::HealthFeatureService;
use builderbase_di::Build;
use builderbase_utils::Apply;
use tokio::net::TcpListener;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Health, Contact> {
    health: Health,
    contact: Contact,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub cors_allowed_origins: Arc<[HeaderValue]>,
}

impl RestServerConfig {
    pub fn new(host: IpAddr, port: u16, cors_allowed_origins: &[String]) -> anyhow::Result<Self> {
        let cors_allowed_origins = cors_allowed_origins
            .iter()
            .map(|origin| {
                origin
                    .parse()
                    .with_context(|| format!("Invalid cors origin {origin:?}"))
            })
            .collect::<anyhow::Result<_>>()?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }
}

impl<Health, Contact> RestServer<Health, Contact>
where
    Health: HealthFeatureService,
    Contact: ContactFeatureService,
{
    pub async fn serve(self) -> anyhow::Result<()> {
        let (host, port) = (self.config.host, self.config.port);
        let router = self.router();
        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind to {host}:{port}"))?;
        axum::serve(listener, router).await.map_err(Into::into)
    }

    pub fn router(self) -> Router<()> {
        let cors_allowed_origins = Some(self.config.cors_allowed_origins.to_vec())
            .filter(|origins| !origins.is_empty());

        let router = Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::contact::router(self.contact.into()))
            .apply_map(cors_allowed_origins, |router, origins| {
                middlewares::cors::add(origins)(router)
            });

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}
