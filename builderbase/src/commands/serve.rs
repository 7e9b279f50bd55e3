use builderbase_config::Config;
use builderbase_di::Provide;
use builderbase_notify_contracts::Notifiers;
use tracing::{info, warn};

use crate::environment::{types::RestServer, ConfigProvider, Provider};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let server = build_server(&config)?;

    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve().await
}

pub fn build_server(config: &Config) -> anyhow::Result<RestServer> {
    let config_provider = ConfigProvider::new(config)?;
    let mut provider = Provider::new(config_provider);

    let notifiers: Notifiers = provider.provide();
    if notifiers.is_empty() {
        warn!("No notification destinations configured, submissions will be discarded");
    }

    Ok(provider.provide())
}
