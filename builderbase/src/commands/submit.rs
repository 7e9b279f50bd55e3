use std::time::Duration;

use builderbase_client::{ContactClient, ContactFormState, ContactFormStatus};
use builderbase_models::contact::{ContactFormField, ContactType};
use chrono::Utc;
use clap::Args;
use url::Url;

#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Your name
    #[arg(long)]
    name: String,
    /// Your email address
    #[arg(long)]
    email: String,
    /// Subject of the message
    #[arg(long)]
    subject: String,
    /// The message
    #[arg(long)]
    message: String,
    /// What the message is about
    #[arg(long, default_value = "general")]
    contact_type: ContactType,
    /// Base url of the relay [default: the configured http address]
    #[arg(long)]
    url: Option<Url>,
    /// Seconds to wait for the server
    #[arg(long, default_value = "30")]
    timeout: u64,
}

impl SubmitCommand {
    pub async fn invoke(self, default_url: Url) -> anyhow::Result<()> {
        let base_url = self.url.unwrap_or(default_url);
        let client = ContactClient::new(&base_url, Duration::from_secs(self.timeout))?;

        let mut state = ContactFormState::new();
        state.update_field(ContactFormField::Name, self.name);
        state.update_field(ContactFormField::Email, self.email);
        state.update_field(ContactFormField::Subject, self.subject);
        state.update_field(ContactFormField::Message, self.message);
        state.set_contact_type(self.contact_type);

        let form = state.begin_submit()?;
        let result = client.submit(&form).await;
        let confirmation = result.as_ref().ok().cloned();
        state.finish_submit(result, Utc::now());

        match state.status() {
            ContactFormStatus::Success { .. } => {
                println!("{}", confirmation.unwrap_or_default());
                Ok(())
            }
            ContactFormStatus::Error { message } => anyhow::bail!("{message}"),
            status => anyhow::bail!("Unexpected form state {status:?}"),
        }
    }
}
