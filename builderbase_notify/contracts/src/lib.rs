use std::sync::Arc;

use builderbase_models::contact::ContactNotification;
use futures::future::BoxFuture;

/// A notification destination for contact form submissions.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait NotifierService: Send + Sync + 'static {
    /// Name of the destination, used in logs.
    fn name(&self) -> &'static str;

    /// Deliver the notification to the destination. A single attempt is made.
    fn notify(
        &self,
        notification: Arc<ContactNotification>,
    ) -> BoxFuture<'static, anyhow::Result<()>>;
}

/// The set of configured notification destinations.
#[derive(Clone)]
pub struct Notifiers(Arc<[Arc<dyn NotifierService>]>);

impl Notifiers {
    pub fn new(notifiers: Vec<Arc<dyn NotifierService>>) -> Self {
        Self(notifiers.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn NotifierService> {
        self.0.iter().map(|notifier| &**notifier)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(|notifier| notifier.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Notifiers {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl std::fmt::Debug for Notifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Notifiers").field(&self.names()).finish()
    }
}

#[cfg(feature = "mock")]
impl MockNotifierService {
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.expect_name().return_const(name);
        self
    }

    pub fn with_notify(mut self, notification: ContactNotification, result: bool) -> Self {
        self.expect_notify()
            .once()
            .withf(move |x| **x == notification)
            .return_once(move |_| {
                Box::pin(std::future::ready(if result {
                    Ok(())
                } else {
                    Err(anyhow::anyhow!("delivery failed"))
                }))
            });
        self
    }

    pub fn without_notify(mut self) -> Self {
        self.expect_notify().never();
        self
    }
}
