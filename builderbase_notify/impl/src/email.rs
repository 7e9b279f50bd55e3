use std::sync::Arc;

use anyhow::{bail, Context};
use builderbase_models::{contact::ContactNotification, email_address::EmailAddressWithName, Sensitive};
use builderbase_notify_contracts::NotifierService;
use builderbase_templates_contracts::{ContactEmailTemplate, TemplateService};
use futures::{future::BoxFuture, FutureExt};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::{format_timestamp, http::HttpClient};

/// https://resend.com/docs/api-reference/emails/send-email
const SEND_EMAIL_ENDPOINT: &str = "https://api.resend.com/emails";

/// Sends an HTML email through the Resend API.
#[derive(Debug, Clone)]
pub struct EmailNotifier<Template> {
    client: HttpClient,
    template: Template,
    config: Arc<EmailNotifierConfig>,
}

#[derive(Debug, Clone)]
pub struct EmailNotifierConfig {
    endpoint: Url,
    api_key: Sensitive<String>,
    from: EmailAddressWithName,
    to: Vec<EmailAddressWithName>,
    brand: String,
}

impl EmailNotifierConfig {
    pub fn new(
        endpoint_override: Option<Url>,
        api_key: Sensitive<String>,
        from: EmailAddressWithName,
        to: Vec<EmailAddressWithName>,
        brand: String,
    ) -> Self {
        Self {
            endpoint: endpoint_override.unwrap_or_else(|| SEND_EMAIL_ENDPOINT.parse().unwrap()),
            api_key,
            from,
            to,
            brand,
        }
    }
}

impl<Template> EmailNotifier<Template> {
    pub fn new(client: HttpClient, template: Template, config: EmailNotifierConfig) -> Self {
        Self {
            client,
            template,
            config: config.into(),
        }
    }
}

impl<Template> NotifierService for EmailNotifier<Template>
where
    Template: TemplateService + Clone,
{
    fn name(&self) -> &'static str {
        "email"
    }

    fn notify(
        &self,
        notification: Arc<ContactNotification>,
    ) -> BoxFuture<'static, anyhow::Result<()>> {
        let client = self.client.clone();
        let template = self.template.clone();
        let config = Arc::clone(&self.config);

        async move {
            let request = SendEmailRequest::new(&notification, &config, &template)?;
            debug!(to = ?request.to, "sending email notification");

            let response = client
                .post(config.endpoint.clone())
                .bearer_auth(config.api_key.as_str())
                .json(&request)
                .send()
                .await
                .context("Failed to send email api request")?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                bail!("Email api request returned {status}: {body}");
            }

            Ok(())
        }
        .boxed()
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    html: String,
    reply_to: String,
}

impl SendEmailRequest {
    fn new(
        notification: &ContactNotification,
        config: &EmailNotifierConfig,
        template: &impl TemplateService,
    ) -> anyhow::Result<Self> {
        let message = &notification.message;

        let html = template
            .render(&ContactEmailTemplate {
                brand: config.brand.clone(),
                name: (*message.author.name).clone(),
                email: (*message.author.email).clone(),
                contact_type: message.contact_type.label().into(),
                subject: (*message.subject).clone(),
                message: (*message.content).clone(),
                reply_url: message.reply_url(),
                timestamp: format_timestamp(notification.received_at),
            })
            .context("Failed to render contact email template")?;

        Ok(Self {
            from: config.from.to_string(),
            to: config.to.iter().map(ToString::to_string).collect(),
            subject: format!("New Contact Form: {}", message.subject.as_str()),
            html,
            reply_to: (*message.author.email).clone(),
        })
    }
}
