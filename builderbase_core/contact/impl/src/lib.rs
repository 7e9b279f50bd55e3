use std::sync::Arc;

use builderbase_core_contact_contracts::{
    ContactFeatureService, ContactSubmitError, DeliveryReport,
};
use builderbase_di::Build;
use builderbase_models::contact::{ContactForm, ContactNotification};
use builderbase_notify_contracts::Notifiers;
use builderbase_shared_contracts::time::TimeService;
use builderbase_utils::trace_instrument;
use futures::{future::join_all, FutureExt};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Build)]
pub struct ContactFeatureServiceImpl<Time> {
    time: Time,
    notifiers: Notifiers,
}

impl<Time> ContactFeatureService for ContactFeatureServiceImpl<Time>
where
    Time: TimeService,
{
    #[trace_instrument(skip(self, form))]
    async fn submit(&self, form: ContactForm) -> Result<DeliveryReport, ContactSubmitError> {
        let unrecognized_contact_type = form.unrecognized_contact_type().map(str::to_owned);

        let message = form
            .validate()
            .inspect_err(|err| debug!("Rejected contact form submission: {err}"))?;

        if let Some(contact_type) = unrecognized_contact_type {
            warn!(
                contact_type = contact_type.as_str(),
                "Unrecognized contact type, using general"
            );
        }

        let notification = Arc::new(ContactNotification {
            message,
            received_at: self.time.now(),
        });

        if self.notifiers.is_empty() {
            warn!("No notification destinations configured, submission is discarded");
        }

        let results = join_all(self.notifiers.iter().map(|notifier| {
            let name = notifier.name();
            notifier
                .notify(Arc::clone(&notification))
                .map(move |result| (name, result))
        }))
        .await;

        let mut report = DeliveryReport::default();
        for (name, result) in results {
            match result {
                Ok(()) => {
                    info!(destination = name, "Contact notification delivered");
                    report.delivered.push(name);
                }
                Err(err) => {
                    error!(
                        destination = name,
                        "Failed to deliver contact notification: {err:#}"
                    );
                    report.failed.push(name);
                }
            }
        }

        Ok(report)
    }
}
