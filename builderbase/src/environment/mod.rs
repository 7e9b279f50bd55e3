use builderbase_api_rest::RestServerConfig;
use builderbase_config::Config;
use builderbase_di::provider;
use builderbase_notify_impl::{
    discord::DiscordNotifierConfig,
    email::EmailNotifierConfig,
    http::HttpClient,
    slack::SlackNotifierConfig,
};

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        ..config: ConfigProvider {
            // API
            RestServerConfig,

            // Notify
            HttpClient,
            NotifiersConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider) -> Self {
        Self {
            _cache: Default::default(),
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        // API
        rest_server_config: RestServerConfig,

        // Notify
        http_client: HttpClient,
        notifiers_config: NotifiersConfig,
    }
}

/// Configuration of the notification destinations. A destination is `None`
/// if its webhook url or api key has not been configured.
#[derive(Debug, Clone)]
pub struct NotifiersConfig {
    pub discord: Option<DiscordNotifierConfig>,
    pub email: Option<EmailNotifierConfig>,
    pub slack: Option<SlackNotifierConfig>,
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // API
        let rest_server_config = RestServerConfig::new(
            config.http.host,
            config.http.port,
            &config.http.cors_allowed_origins,
        )?;

        // Notify
        let notify = &config.notify;
        let http_client = HttpClient::new(*notify.timeout)?;

        let notifiers_config = NotifiersConfig {
            discord: notify
                .discord
                .webhook_url
                .as_ref()
                .map(|webhook_url| DiscordNotifierConfig {
                    webhook_url: (**webhook_url).clone(),
                    brand: notify.brand.clone(),
                    icon_url: notify.icon_url.clone(),
                }),
            email: notify.email.api_key.as_ref().map(|api_key| {
                EmailNotifierConfig::new(
                    notify.email.endpoint_override.clone(),
                    api_key.clone(),
                    notify.email.from.clone(),
                    notify.email.to.clone(),
                    notify.brand.clone(),
                )
            }),
            slack: notify
                .slack
                .webhook_url
                .as_ref()
                .map(|webhook_url| SlackNotifierConfig {
                    webhook_url: (**webhook_url).clone(),
                }),
        };

        Ok(Self {
            _cache: Default::default(),
            rest_server_config,
            http_client,
            notifiers_config,
        })
    }
}
