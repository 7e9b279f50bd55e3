use builderbase_core_health_contracts::HealthStatus;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiHealthStatus {
    pub http: bool,
    pub notifiers: Vec<&'static str>,
}

impl From<HealthStatus> for ApiHealthStatus {
    fn from(value: HealthStatus) -> Self {
        Self {
            http: true,
            notifiers: value.notifiers,
        }
    }
}
