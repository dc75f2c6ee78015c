use nexns_domain::{DatasetNotification, DomainError, NotificationAction};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{RefreshDomainUseCase, UpdateGate};
use crate::ports::DomainStore;

/// Applies one change notification to the index.
///
/// Both outcomes are idempotent, so duplicate or replayed notifications
/// are harmless.
pub struct HandleNotificationUseCase {
    refresh: Arc<RefreshDomainUseCase>,
    store: Arc<dyn DomainStore>,
    gate: UpdateGate,
}

impl HandleNotificationUseCase {
    pub fn new(refresh: Arc<RefreshDomainUseCase>, store: Arc<dyn DomainStore>) -> Self {
        Self {
            refresh,
            store,
            gate: UpdateGate::new(),
        }
    }

    /// Shares `gate` with the full sync so the two never interleave.
    pub fn with_update_gate(mut self, gate: UpdateGate) -> Self {
        self.gate = gate;
        self
    }

    #[instrument(skip(self), fields(domain_id = notification.domain))]
    pub async fn execute(&self, notification: &DatasetNotification) -> Result<(), DomainError> {
        let _gate = self.gate.enter().await;
        match notification.action() {
            NotificationAction::Refresh => self.refresh.execute(notification.domain).await,
            NotificationAction::Delete => {
                match self.store.name_for_id(notification.domain) {
                    Some(name) => {
                        self.store.remove(&name);
                        info!(domain = %name, "Domain dataset removed");
                    }
                    None => debug!("Delete for a domain that is not loaded"),
                }
                Ok(())
            }
        }
    }
}
