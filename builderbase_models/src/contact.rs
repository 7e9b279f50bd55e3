use std::{borrow::Cow, str::FromStr, sync::LazyLock};

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::macros::nutype_string;

/// Number of characters of the message shown in chat previews.
pub const MESSAGE_PREVIEW_LEN: usize = 1000;

/// Whitespace here also covers the byte order mark, which `\s` leaves out.
pub static CONTACT_EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$").unwrap()
});

/// A contact form submission as it was received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub contact_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactFormField {
    Name,
    Email,
    Subject,
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactFormError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Invalid email format")]
    InvalidEmail,
}

impl ContactForm {
    /// Returns the required fields which have been left empty.
    pub fn missing_fields(&self) -> Vec<ContactFormField> {
        [
            (ContactFormField::Name, &self.name),
            (ContactFormField::Email, &self.email),
            (ContactFormField::Subject, &self.subject),
            (ContactFormField::Message, &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Returns the contact type value if it is set but not one of the known
    /// contact types.
    pub fn unrecognized_contact_type(&self) -> Option<&str> {
        self.contact_type
            .as_deref()
            .filter(|value| !value.is_empty() && value.parse::<ContactType>().is_err())
    }

    /// Validates the submission.
    ///
    /// Missing fields are reported before a malformed email address. An empty
    /// or unrecognized contact type falls back to [`ContactType::General`].
    pub fn validate(self) -> Result<ContactMessage, ContactFormError> {
        if !self.missing_fields().is_empty() {
            return Err(ContactFormError::MissingFields);
        }

        let email = ContactMessageAuthorEmail::try_new(self.email)
            .map_err(|_| ContactFormError::InvalidEmail)?;
        let name = ContactMessageAuthorName::try_new(self.name)
            .map_err(|_| ContactFormError::MissingFields)?;
        let subject = ContactMessageSubject::try_new(self.subject)
            .map_err(|_| ContactFormError::MissingFields)?;
        let content = ContactMessageContent::try_new(self.message)
            .map_err(|_| ContactFormError::MissingFields)?;

        let contact_type = self
            .contact_type
            .as_deref()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();

        Ok(ContactMessage {
            author: ContactMessageAuthor { name, email },
            subject,
            content,
            contact_type,
        })
    }
}

impl ContactFormField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub author: ContactMessageAuthor,
    pub subject: ContactMessageSubject,
    pub content: ContactMessageContent,
    pub contact_type: ContactType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageAuthor {
    pub name: ContactMessageAuthorName,
    pub email: ContactMessageAuthorEmail,
}

nutype_string!(ContactMessageAuthorName(validate(not_empty)));
nutype_string!(ContactMessageAuthorEmail(validate(
    not_empty,
    regex = CONTACT_EMAIL_REGEX
)));
nutype_string!(ContactMessageSubject(validate(not_empty)));
nutype_string!(ContactMessageContent(validate(not_empty)));

impl ContactMessage {
    /// `mailto:` link for answering the author, with the subject prefixed by
    /// `Re: `.
    pub fn reply_url(&self) -> String {
        format!(
            "mailto:{}?subject={}",
            self.author.email.as_str(),
            urlencoding::encode(&format!("Re: {}", self.subject.as_str()))
        )
    }
}

impl ContactMessageContent {
    /// Returns the first `max_chars` characters followed by `...`, or the whole
    /// content if it is not longer than that.
    pub fn truncated(&self, max_chars: usize) -> Cow<'_, str> {
        let content = self.as_str();
        match content.char_indices().nth(max_chars) {
            Some((end, _)) => format!("{}...", &content[..end]).into(),
            None => content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    #[default]
    General,
    Partnership,
    Collaboration,
    Support,
    Media,
    Investment,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown contact type {0:?}")]
pub struct UnknownContactType(pub String);

impl ContactType {
    pub const ALL: [Self; 6] = [
        Self::General,
        Self::Partnership,
        Self::Collaboration,
        Self::Support,
        Self::Media,
        Self::Investment,
    ];

    /// The value used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Partnership => "partnership",
            Self::Collaboration => "collaboration",
            Self::Support => "support",
            Self::Media => "media",
            Self::Investment => "investment",
        }
    }

    /// The name used in notifications.
    pub fn label(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Partnership => "Partnership",
            Self::Collaboration => "Collaboration",
            Self::Support => "Support",
            Self::Media => "Media",
            Self::Investment => "Investment",
        }
    }

    /// The description shown to users filling out the form.
    pub fn description(self) -> &'static str {
        match self {
            Self::General => "General Inquiry",
            Self::Partnership => "Partnership",
            Self::Collaboration => "Collaboration",
            Self::Support => "Support",
            Self::Media => "Media & Press",
            Self::Investment => "Investment",
        }
    }
}

impl FromStr for ContactType {
    type Err = UnknownContactType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownContactType(s.into()))
    }
}

impl std::fmt::Display for ContactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated contact message, ready to be delivered to the notification
/// destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactNotification {
    pub message: ContactMessage,
    pub received_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use builderbase_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "Ada".into(),
            email: "ada@x.com".into(),
            subject: "Hi".into(),
            message: "Hello there".into(),
            contact_type: Some("partnership".into()),
        }
    }

    #[test]
    fn validate_ok() {
        let result = form().validate().unwrap();

        assert_eq!(result.author.name.as_str(), "Ada");
        assert_eq!(result.author.email.as_str(), "ada@x.com");
        assert_eq!(result.subject.as_str(), "Hi");
        assert_eq!(result.content.as_str(), "Hello there");
        assert_eq!(result.contact_type, ContactType::Partnership);
    }

    #[test]
    fn validate_missing_fields() {
        let clears: [fn(&mut ContactForm); 4] = [
            |f| f.name.clear(),
            |f| f.email.clear(),
            |f| f.subject.clear(),
            |f| f.message.clear(),
        ];
        for clear in clears {
            let mut form = form();
            clear(&mut form);
            assert_matches!(form.validate(), Err(ContactFormError::MissingFields));
        }
    }

    #[test]
    fn validate_missing_fields_before_invalid_email() {
        let form = ContactForm {
            name: String::new(),
            email: "not-an-email".into(),
            ..form()
        };
        assert_matches!(form.validate(), Err(ContactFormError::MissingFields));
    }

    #[test]
    fn validate_invalid_email() {
        for email in [
            "not-an-email",
            "ada@x",
            "ada@@x.com",
            "ada x@x.com",
            "@x.com",
            "ada@.",
            "ada\u{FEFF}@x.com",
            "ada@x.\u{FEFF}com",
        ] {
            let form = ContactForm {
                email: email.into(),
                ..form()
            };
            assert_matches!(form.validate(), Err(ContactFormError::InvalidEmail));
        }
    }

    #[test]
    fn validate_accepts_loose_email_shapes() {
        for email in ["ada@x.com", "a.b+c@sub.domain.org", "ada@x.y.z"] {
            let form = ContactForm {
                email: email.into(),
                ..form()
            };
            form.validate().unwrap();
        }
    }

    #[test]
    fn contact_type_defaults_to_general() {
        for contact_type in [None, Some(""), Some("unknown")] {
            let form = ContactForm {
                contact_type: contact_type.map(Into::into),
                ..form()
            };
            let result = form.validate().unwrap();
            assert_eq!(result.contact_type, ContactType::General);
            assert_eq!(result.contact_type.to_string(), "General");
        }
    }

    #[test]
    fn unrecognized_contact_type() {
        let mut form = form();
        assert_eq!(form.unrecognized_contact_type(), None);

        form.contact_type = Some(String::new());
        assert_eq!(form.unrecognized_contact_type(), None);

        form.contact_type = Some("Sponsoring".into());
        assert_eq!(form.unrecognized_contact_type(), Some("Sponsoring"));
    }

    #[test]
    fn parse_contact_type() {
        for ty in ContactType::ALL {
            assert_eq!(ty.as_str().parse::<ContactType>().unwrap(), ty);
        }
        assert_eq!("  Media ".parse::<ContactType>().unwrap(), ContactType::Media);
        assert_eq!(
            "press".parse::<ContactType>(),
            Err(UnknownContactType("press".into()))
        );
    }

    #[test]
    fn contact_type_serde() {
        let json = serde_json::to_string(&ContactType::Investment).unwrap();
        assert_eq!(json, "\"investment\"");
    }

    #[test]
    fn missing_fields() {
        let form = ContactForm {
            name: String::new(),
            message: String::new(),
            ..form()
        };
        assert_eq!(
            form.missing_fields(),
            [ContactFormField::Name, ContactFormField::Message]
        );
    }

    #[test]
    fn truncated_short_content() {
        let content = ContactMessageContent::try_new("Hello".to_owned()).unwrap();
        assert_eq!(content.truncated(MESSAGE_PREVIEW_LEN), "Hello");

        let exact = ContactMessageContent::try_new("x".repeat(1000)).unwrap();
        assert_eq!(exact.truncated(MESSAGE_PREVIEW_LEN), "x".repeat(1000));
    }

    #[test]
    fn truncated_long_content() {
        let content = ContactMessageContent::try_new("x".repeat(1500)).unwrap();
        let result = content.truncated(MESSAGE_PREVIEW_LEN);
        assert_eq!(result, format!("{}...", "x".repeat(1000)));
    }

    #[test]
    fn truncated_counts_characters() {
        let content = ContactMessageContent::try_new("ä".repeat(1001)).unwrap();
        let result = content.truncated(MESSAGE_PREVIEW_LEN);
        assert_eq!(result.chars().count(), 1003);
        assert!(result.starts_with(&"ä".repeat(1000)));
    }

    #[test]
    fn reply_url() {
        let message = form().validate().unwrap();
        assert_eq!(message.reply_url(), "mailto:ada@x.com?subject=Re%3A%20Hi");
    }
}
