use chrono::{DateTime, Utc};

pub mod discord;
pub mod email;
pub mod http;
pub mod slack;

const TITLE: &str = "🚀 New Contact Form Submission";

/// Human readable timestamp used in email and slack notifications.
fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

#[cfg(test)]
mod tests {
    use builderbase_models::contact::{ContactForm, ContactNotification};
    use chrono::TimeZone;

    use super::*;

    pub(crate) fn notification(message: &str, contact_type: Option<&str>) -> ContactNotification {
        ContactNotification {
            message: ContactForm {
                name: "Ada".into(),
                email: "ada@x.com".into(),
                subject: "Hi".into(),
                message: message.into(),
                contact_type: contact_type.map(Into::into),
            }
            .validate()
            .unwrap(),
            received_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 15).unwrap(),
        }
    }

    #[test]
    fn timestamp() {
        let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 8, 3, 9).unwrap();
        assert_eq!(format_timestamp(timestamp), "2024-05-01 08:03:09 UTC");
    }
}
