//! Client side of the contact form: the form state machine shown to the user
//! and the HTTP client which submits it to the relay.

pub use client::{ContactClient, ContactClientError};
pub use form::{BeginSubmitError, ContactFormState, ContactFormStatus};

pub mod client;
pub mod form;

/// Shown when the server rejected a submission without saying why.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to send message. Please try again.";

/// Shown when the server could not be reached.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

/// Shown when the server accepted a submission without a confirmation message.
pub const SUCCESS_MESSAGE: &str = "Message sent successfully! We'll get back to you soon.";
