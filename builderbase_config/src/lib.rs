use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use builderbase_models::{email_address::EmailAddressWithName, Sensitive};
use config::{File, FileFormat};
pub use duration::Duration;
use serde::Deserialize;
use url::Url;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");
pub const DEV_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.dev.toml");

/// Environment variable containing a colon separated list of config files.
pub const CONFIG_PATH_ENV: &str = "BUILDERBASE_CONFIG";

/// Environment variables which enable the notification destinations, and the
/// config keys they override.
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("DISCORD_WEBHOOK_URL", "notify.discord.webhook_url"),
    ("RESEND_API_KEY", "notify.email.api_key"),
    ("SLACK_WEBHOOK_URL", "notify.slack.webhook_url"),
];

/// Load the config files listed in `BUILDERBASE_CONFIG` (or the default config
/// file) and apply the environment overrides.
pub fn load() -> anyhow::Result<Config> {
    let paths = match std::env::var(CONFIG_PATH_ENV) {
        Ok(paths) => paths
            .split(':')
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .collect(),
        Err(_) => vec![PathBuf::from(DEFAULT_CONFIG_PATH)],
    };

    load_with(&paths, &[], |key| std::env::var(key).ok())
}

/// Load the default config merged with the development config, which points
/// all notification destinations to the local testing server.
pub fn load_dev_config() -> anyhow::Result<Config> {
    load_with(&[DEFAULT_CONFIG_PATH, DEV_CONFIG_PATH], &[], |_| None)
}

/// Load the given config files and apply the given TOML snippets on top.
pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    load_with(paths, overrides, |_| None)
}

fn load_with(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    let builder = overrides.iter().fold(builder, |builder, &snippet| {
        builder.add_source(File::from_str(snippet, FileFormat::Toml))
    });

    ENV_OVERRIDES
        .iter()
        .try_fold(builder, |builder, &(var, key)| {
            let value = env(var).filter(|value| !value.is_empty());
            builder.set_override_option(key, value)
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub notify: NotifyConfig,
    pub sentry: Option<SentryConfig>,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct NotifyConfig {
    pub timeout: Duration,
    pub brand: String,
    pub icon_url: Url,
    #[serde(default)]
    pub discord: DiscordConfig,
    pub email: EmailNotifyConfig,
    #[serde(default)]
    pub slack: SlackConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct DiscordConfig {
    pub webhook_url: Option<Sensitive<Url>>,
}

#[derive(Debug, Deserialize)]
pub struct EmailNotifyConfig {
    pub api_key: Option<Sensitive<String>>,
    pub endpoint_override: Option<Url>,
    pub from: EmailAddressWithName,
    pub to: Vec<EmailAddressWithName>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SlackConfig {
    pub webhook_url: Option<Sensitive<Url>>,
}

#[derive(Debug, Deserialize)]
pub struct SentryConfig {
    pub dsn: Sensitive<String>,
}
