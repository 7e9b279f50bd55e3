use builderbase_core_health_contracts::{HealthFeatureService, HealthStatus};
use builderbase_di::Build;
use builderbase_notify_contracts::Notifiers;

#[derive(Debug, Clone, Build)]
pub struct HealthFeatureServiceImpl {
    notifiers: Notifiers,
}

impl HealthFeatureService for HealthFeatureServiceImpl {
    async fn get_status(&self) -> HealthStatus {
        HealthStatus {
            notifiers: self.notifiers.names(),
        }
    }
}
