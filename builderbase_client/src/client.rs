use std::time::Duration;

use anyhow::{anyhow, Context};
use builderbase_models::contact::ContactForm;
use builderbase_utils::builderbase_version;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::SUCCESS_MESSAGE;

/// Submits contact forms to the relay at `<base_url>/api/contact`.
#[derive(Debug, Clone)]
pub struct ContactClient {
    client: reqwest::Client,
    endpoint: Url,
}

#[derive(Debug, Error)]
pub enum ContactClientError {
    /// The server answered with a non-success status and, if available, the
    /// error message from the response body.
    #[error("Submission rejected: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),
    #[error("Failed to reach the server: {0}")]
    Network(#[source] reqwest::Error),
    /// The response body could not be read as JSON.
    #[error("Invalid response from the server: {0}")]
    InvalidResponse(#[source] reqwest::Error),
}

impl ContactClient {
    pub fn new(base_url: &Url, timeout: Duration) -> anyhow::Result<Self> {
        let mut endpoint = base_url.clone();
        endpoint
            .path_segments_mut()
            .map_err(|()| anyhow!("Invalid base url {base_url}"))?
            .pop_if_empty()
            .extend(["api", "contact"]);

        let client = reqwest::Client::builder()
            .user_agent(format!(
                "Builder Base Contact Client (Version {})",
                builderbase_version()
            ))
            .timeout(timeout)
            .build()
            .context("Failed to build http client")?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send the form and return the confirmation message of the server.
    pub async fn submit(&self, form: &ContactForm) -> Result<String, ContactClientError> {
        debug!(endpoint = %self.endpoint, "submitting contact form");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&SubmitRequest::from(form))
            .send()
            .await
            .map_err(ContactClientError::Network)?;

        let status = response.status();
        let body = response
            .json::<SubmitResponse>()
            .await
            .inspect_err(|err| debug!(%status, "invalid response body: {err}"))
            .map_err(ContactClientError::InvalidResponse)?;

        if status.is_success() {
            Ok(body.message.unwrap_or_else(|| SUCCESS_MESSAGE.into()))
        } else {
            debug!(%status, error = ?body.error, "contact form rejected");
            Err(ContactClientError::Rejected(body.error))
        }
    }
}

#[derive(Serialize)]
struct SubmitRequest<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
    #[serde(rename = "contactType", skip_serializing_if = "Option::is_none")]
    contact_type: Option<&'a str>,
}

impl<'a> From<&'a ContactForm> for SubmitRequest<'a> {
    fn from(form: &'a ContactForm) -> Self {
        Self {
            name: &form.name,
            email: &form.email,
            subject: &form.subject,
            message: &form.message,
            contact_type: form.contact_type.as_deref(),
        }
    }
}

#[derive(Deserialize)]
struct SubmitResponse {
    message: Option<String>,
    error: Option<String>,
}
