use serde::Serialize;

pub mod contact;
pub mod health;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: &'static str,
}
