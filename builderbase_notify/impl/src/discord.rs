use std::{borrow::Cow, sync::Arc};

use anyhow::Context;
use builderbase_models::contact::{ContactNotification, MESSAGE_PREVIEW_LEN};
use builderbase_notify_contracts::NotifierService;
use chrono::SecondsFormat;
use futures::{future::BoxFuture, FutureExt};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::{http::HttpClient, TITLE};

const COLOR: u32 = 0x7c3aed;

/// Posts an embed to a Discord webhook.
#[derive(Debug, Clone)]
pub struct DiscordNotifier {
    client: HttpClient,
    config: Arc<DiscordNotifierConfig>,
}

#[derive(Debug, Clone)]
pub struct DiscordNotifierConfig {
    pub webhook_url: Url,
    pub brand: String,
    pub icon_url: Url,
}

impl DiscordNotifier {
    pub fn new(client: HttpClient, config: DiscordNotifierConfig) -> Self {
        Self {
            client,
            config: config.into(),
        }
    }
}

impl NotifierService for DiscordNotifier {
    fn name(&self) -> &'static str {
        "discord"
    }

    fn notify(
        &self,
        notification: Arc<ContactNotification>,
    ) -> BoxFuture<'static, anyhow::Result<()>> {
        let client = self.client.clone();
        let config = Arc::clone(&self.config);

        async move {
            let payload = WebhookPayload::new(&notification, &config);
            debug!(url = %config.webhook_url.host_str().unwrap_or_default(), "sending discord webhook");

            client
                .post(config.webhook_url.clone())
                .json(&payload)
                .send()
                .await
                .context("Failed to send discord webhook request")?
                .error_for_status()
                .context("Discord webhook request returned an error")?;

            Ok(())
        }
        .boxed()
    }
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    embeds: [Embed<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Embed<'a> {
    title: &'static str,
    color: u32,
    fields: Vec<EmbedField<'a>>,
    timestamp: String,
    footer: EmbedFooter<'a>,
}

#[derive(Debug, Serialize)]
struct EmbedField<'a> {
    name: &'static str,
    value: Cow<'a, str>,
    inline: bool,
}

#[derive(Debug, Serialize)]
struct EmbedFooter<'a> {
    text: String,
    icon_url: &'a str,
}

impl<'a> WebhookPayload<'a> {
    fn new(notification: &'a ContactNotification, config: &'a DiscordNotifierConfig) -> Self {
        let message = &notification.message;

        let field = |name, value: Cow<'a, str>, inline| EmbedField {
            name,
            value,
            inline,
        };

        Self {
            embeds: [Embed {
                title: TITLE,
                color: COLOR,
                fields: vec![
                    field("👤 Name", message.author.name.as_str().into(), true),
                    field("📧 Email", message.author.email.as_str().into(), true),
                    field("📋 Contact Type", message.contact_type.label().into(), true),
                    field("📝 Subject", message.subject.as_str().into(), false),
                    field(
                        "💬 Message",
                        message.content.truncated(MESSAGE_PREVIEW_LEN),
                        false,
                    ),
                ],
                timestamp: notification
                    .received_at
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
                footer: EmbedFooter {
                    text: format!("{} Contact Form", config.brand),
                    icon_url: config.icon_url.as_str(),
                },
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::tests::notification;

    fn config() -> DiscordNotifierConfig {
        DiscordNotifierConfig {
            webhook_url: "https://discord.example/api/webhooks/1/token".parse().unwrap(),
            brand: "Builder Base".into(),
            icon_url: "https://builderbase.xyz/images/builder-base-logo.png"
                .parse()
                .unwrap(),
        }
    }

    #[test]
    fn payload() {
        // Arrange
        let notification = notification("Hello there", Some("partnership"));
        let config = config();

        // Act
        let result = serde_json::to_value(WebhookPayload::new(&notification, &config)).unwrap();

        // Assert
        assert_eq!(
            result,
            json!({
                "embeds": [{
                    "title": "🚀 New Contact Form Submission",
                    "color": 0x7c3aed,
                    "fields": [
                        {"name": "👤 Name", "value": "Ada", "inline": true},
                        {"name": "📧 Email", "value": "ada@x.com", "inline": true},
                        {"name": "📋 Contact Type", "value": "Partnership", "inline": true},
                        {"name": "📝 Subject", "value": "Hi", "inline": false},
                        {"name": "💬 Message", "value": "Hello there", "inline": false},
                    ],
                    "timestamp": "2024-05-01T12:30:15.000Z",
                    "footer": {
                        "text": "Builder Base Contact Form",
                        "icon_url": "https://builderbase.xyz/images/builder-base-logo.png",
                    },
                }],
            })
        );
    }

    #[test]
    fn payload_truncates_long_message() {
        // Arrange
        let notification = notification(&"a".repeat(1200), None);
        let config = config();

        // Act
        let result = serde_json::to_value(WebhookPayload::new(&notification, &config)).unwrap();

        // Assert
        assert_eq!(
            result["embeds"][0]["fields"][4]["value"],
            format!("{}...", "a".repeat(1000))
        );
    }

    #[test]
    fn payload_default_contact_type() {
        // Arrange
        let notification = notification("Hello", None);
        let config = config();

        // Act
        let result = serde_json::to_value(WebhookPayload::new(&notification, &config)).unwrap();

        // Assert
        assert_eq!(result["embeds"][0]["fields"][2]["value"], "General");
    }
}
