use builderbase_models::contact::ContactForm;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Contact form submission. Missing fields and values which are not strings
/// are treated as empty.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiContactForm {
    #[serde(default, deserialize_with = "string_or_absent")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "string_or_absent")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "string_or_absent")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "string_or_absent")]
    pub message: Option<String>,
    #[serde(
        rename = "contactType",
        default,
        deserialize_with = "string_or_absent"
    )]
    pub contact_type: Option<String>,
}

fn string_or_absent<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => Some(value),
        _ => None,
    })
}

impl From<ApiContactForm> for ContactForm {
    fn from(value: ApiContactForm) -> Self {
        Self {
            name: value.name.unwrap_or_default(),
            email: value.email.unwrap_or_default(),
            subject: value.subject.unwrap_or_default(),
            message: value.message.unwrap_or_default(),
            contact_type: value.contact_type,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiContactResponse {
    pub success: bool,
    pub message: &'static str,
}
