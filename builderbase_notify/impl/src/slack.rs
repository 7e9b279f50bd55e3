use std::sync::Arc;

use anyhow::Context;
use builderbase_models::contact::ContactNotification;
use builderbase_notify_contracts::NotifierService;
use futures::{future::BoxFuture, FutureExt};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::{format_timestamp, http::HttpClient, TITLE};

/// Posts a block layout message to a Slack incoming webhook.
#[derive(Debug, Clone)]
pub struct SlackNotifier {
    client: HttpClient,
    config: Arc<SlackNotifierConfig>,
}

#[derive(Debug, Clone)]
pub struct SlackNotifierConfig {
    pub webhook_url: Url,
}

impl SlackNotifier {
    pub fn new(client: HttpClient, config: SlackNotifierConfig) -> Self {
        Self {
            client,
            config: config.into(),
        }
    }
}

impl NotifierService for SlackNotifier {
    fn name(&self) -> &'static str {
        "slack"
    }

    fn notify(
        &self,
        notification: Arc<ContactNotification>,
    ) -> BoxFuture<'static, anyhow::Result<()>> {
        let client = self.client.clone();
        let config = Arc::clone(&self.config);

        async move {
            let payload = WebhookPayload::new(&notification);
            debug!("sending slack webhook");

            client
                .post(config.webhook_url.clone())
                .json(&payload)
                .send()
                .await
                .context("Failed to send slack webhook request")?
                .error_for_status()
                .context("Slack webhook request returned an error")?;

            Ok(())
        }
        .boxed()
    }
}

#[derive(Debug, Serialize)]
struct WebhookPayload {
    blocks: Vec<Block>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Block {
    Header {
        text: Text,
    },
    #[serde(rename = "section")]
    SectionFields {
        fields: Vec<Text>,
    },
    Section {
        text: Text,
    },
    Actions {
        elements: Vec<Element>,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum Text {
    #[serde(rename = "plain_text")]
    Plain { text: String },
    #[serde(rename = "mrkdwn")]
    Markdown { text: String },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Element {
    Button {
        text: Text,
        url: String,
        style: &'static str,
    },
}

impl WebhookPayload {
    fn new(notification: &ContactNotification) -> Self {
        let message = &notification.message;

        let field = |label: &str, value: &str| Text::Markdown {
            text: format!("*{label}:*\n{value}"),
        };

        Self {
            blocks: vec![
                Block::Header {
                    text: Text::Plain { text: TITLE.into() },
                },
                Block::SectionFields {
                    fields: vec![
                        field("Name", message.author.name.as_str()),
                        field("Email", message.author.email.as_str()),
                        field("Type", message.contact_type.label()),
                        field("Time", &format_timestamp(notification.received_at)),
                    ],
                },
                Block::Section {
                    text: field("Subject", message.subject.as_str()),
                },
                Block::Section {
                    text: field("Message", message.content.as_str()),
                },
                Block::Actions {
                    elements: vec![Element::Button {
                        text: Text::Plain {
                            text: "Reply via Email".into(),
                        },
                        url: message.reply_url(),
                        style: "primary",
                    }],
                },
            ],
        }
    }
}
