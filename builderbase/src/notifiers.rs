use std::sync::Arc;

use builderbase_di::{Build, Provide, Provider as _};
use builderbase_notify_contracts::{NotifierService, Notifiers};
use builderbase_notify_impl::{
    discord::DiscordNotifier, email::EmailNotifier, http::HttpClient, slack::SlackNotifier,
};
use tracing::info;

use crate::environment::{types::Template, NotifiersConfig, Provider};

impl Build<Provider> for Notifiers {
    fn build(provider: &mut Provider) -> Self {
        if let Some(cached) = provider.cache().get::<Self>() {
            return cached.clone();
        }

        let client: HttpClient = provider.provide();
        let template: Template = provider.provide();
        let NotifiersConfig {
            discord,
            email,
            slack,
        } = provider.provide();

        let notifiers = [
            (
                "discord",
                discord.map(|config| {
                    Arc::new(DiscordNotifier::new(client.clone(), config))
                        as Arc<dyn NotifierService>
                }),
            ),
            (
                "email",
                email.map(|config| {
                    Arc::new(EmailNotifier::new(client.clone(), template, config))
                        as Arc<dyn NotifierService>
                }),
            ),
            (
                "slack",
                slack.map(|config| {
                    Arc::new(SlackNotifier::new(client.clone(), config)) as Arc<dyn NotifierService>
                }),
            ),
        ]
        .into_iter()
        .filter_map(|(name, notifier)| {
            match &notifier {
                Some(_) => info!("Notification destination {name} enabled"),
                None => info!("Notification destination {name} disabled (not configured)"),
            }
            notifier
        })
        .collect();

        let notifiers = Notifiers::new(notifiers);
        provider.cache().insert(notifiers.clone());
        notifiers
    }
}

#[cfg(test)]
mod tests {
    use builderbase_config::{load_dev_config, load_with_override, DEFAULT_CONFIG_PATH};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::environment::ConfigProvider;

    #[test]
    fn all_destinations_configured() {
        let config = load_dev_config().unwrap();
        let mut provider = Provider::new(ConfigProvider::new(&config).unwrap());

        let notifiers: Notifiers = provider.provide();

        assert_eq!(notifiers.names(), ["discord", "email", "slack"]);
    }

    #[test]
    fn unconfigured_destinations_are_skipped() {
        let config = load_with_override(
            &[DEFAULT_CONFIG_PATH],
            &["notify.slack.webhook_url = \"https://hooks.slack.example/services/x\""],
        )
        .unwrap();
        let mut provider = Provider::new(ConfigProvider::new(&config).unwrap());

        let notifiers: Notifiers = provider.provide();

        assert_eq!(notifiers.names(), ["slack"]);
    }

    #[test]
    fn no_destinations_configured() {
        let config = load_with_override(&[DEFAULT_CONFIG_PATH], &[]).unwrap();
        let mut provider = Provider::new(ConfigProvider::new(&config).unwrap());

        let notifiers: Notifiers = provider.provide();

        assert!(notifiers.is_empty());
    }
}
