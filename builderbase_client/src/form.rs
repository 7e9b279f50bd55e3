use builderbase_models::contact::{ContactForm, ContactFormField, ContactType};
use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;

use crate::{ContactClientError, FALLBACK_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE};

/// How long the success message is shown before the form is cleared.
pub const RESET_DELAY: TimeDelta = TimeDelta::seconds(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactFormStatus {
    Editing,
    Submitting,
    Success { since: DateTime<Utc> },
    Error { message: String },
}

/// State of the contact form as seen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFormState {
    name: String,
    email: String,
    subject: String,
    message: String,
    contact_type: ContactType,
    status: ContactFormStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BeginSubmitError {
    #[error("A submission is already in progress")]
    AlreadySubmitting,
    #[error("Please fill out: {}", .0.iter().map(|field| field.as_str()).collect::<Vec<_>>().join(", "))]
    MissingFields(Vec<ContactFormField>),
}

impl Default for ContactFormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            subject: String::new(),
            message: String::new(),
            contact_type: ContactType::General,
            status: ContactFormStatus::Editing,
        }
    }
}

impl ContactFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &ContactFormStatus {
        &self.status
    }

    pub fn field(&self, field: ContactFormField) -> &str {
        match field {
            ContactFormField::Name => &self.name,
            ContactFormField::Email => &self.email,
            ContactFormField::Subject => &self.subject,
            ContactFormField::Message => &self.message,
        }
    }

    pub fn contact_type(&self) -> ContactType {
        self.contact_type
    }

    /// Options of the contact type select, as `(value, description)` pairs.
    pub fn contact_type_options() -> impl Iterator<Item = (&'static str, &'static str)> {
        ContactType::ALL
            .into_iter()
            .map(|ty| (ty.as_str(), ty.description()))
    }

    /// Set the value of a text field. A displayed error is cleared.
    pub fn update_field(&mut self, field: ContactFormField, value: impl Into<String>) {
        let slot = match field {
            ContactFormField::Name => &mut self.name,
            ContactFormField::Email => &mut self.email,
            ContactFormField::Subject => &mut self.subject,
            ContactFormField::Message => &mut self.message,
        };
        *slot = value.into();
        self.clear_error();
    }

    /// Select a contact type. A displayed error is cleared.
    pub fn set_contact_type(&mut self, contact_type: ContactType) {
        self.contact_type = contact_type;
        self.clear_error();
    }

    /// Check that all required fields are filled out and enter the
    /// `Submitting` state. Returns the form to send to the server.
    pub fn begin_submit(&mut self) -> Result<ContactForm, BeginSubmitError> {
        if self.status == ContactFormStatus::Submitting {
            return Err(BeginSubmitError::AlreadySubmitting);
        }

        let form = self.to_form();
        let missing = form.missing_fields();
        if !missing.is_empty() {
            return Err(BeginSubmitError::MissingFields(missing));
        }

        self.status = ContactFormStatus::Submitting;
        Ok(form)
    }

    /// Record the outcome of a submission started with
    /// [`begin_submit`](Self::begin_submit).
    pub fn finish_submit(&mut self, result: Result<String, ContactClientError>, now: DateTime<Utc>) {
        if self.status != ContactFormStatus::Submitting {
            return;
        }

        self.status = match result {
            Ok(_) => ContactFormStatus::Success { since: now },
            Err(err) => ContactFormStatus::Error {
                message: error_message(err),
            },
        };
    }

    /// Clear the form once the success message has been shown for
    /// [`RESET_DELAY`]. Returns whether the form has been cleared.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        match self.status {
            ContactFormStatus::Success { since } if now - since >= RESET_DELAY => {
                *self = Self::default();
                true
            }
            _ => false,
        }
    }

    fn clear_error(&mut self) {
        if matches!(self.status, ContactFormStatus::Error { .. }) {
            self.status = ContactFormStatus::Editing;
        }
    }

    fn to_form(&self) -> ContactForm {
        ContactForm {
            name: self.name.clone(),
            email: self.email.clone(),
            subject: self.subject.clone(),
            message: self.message.clone(),
            contact_type: Some(self.contact_type.as_str().into()),
        }
    }
}

fn error_message(err: ContactClientError) -> String {
    match err {
        ContactClientError::Rejected(Some(message)) => message,
        ContactClientError::Rejected(None) => FALLBACK_ERROR_MESSAGE.into(),
        ContactClientError::Network(_) | ContactClientError::InvalidResponse(_) => {
            NETWORK_ERROR_MESSAGE.into()
        }
    }
}
