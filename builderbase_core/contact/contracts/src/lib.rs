use std::future::Future;

use builderbase_models::contact::{ContactForm, ContactFormError};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validate a contact form submission and forward it to all configured
    /// notification destinations.
    ///
    /// Delivery failures are logged and reported in the returned
    /// [`DeliveryReport`], but never fail the submission.
    fn submit(
        &self,
        form: ContactForm,
    ) -> impl Future<Output = Result<DeliveryReport, ContactSubmitError>> + Send;
}

/// Names of the destinations which accepted or rejected a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: Vec<&'static str>,
    pub failed: Vec<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactSubmitError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Invalid email format")]
    InvalidEmail,
}

impl From<ContactFormError> for ContactSubmitError {
    fn from(err: ContactFormError) -> Self {
        match err {
            ContactFormError::MissingFields => Self::MissingFields,
            ContactFormError::InvalidEmail => Self::InvalidEmail,
        }
    }
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(
        mut self,
        form: ContactForm,
        result: Result<DeliveryReport, ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
