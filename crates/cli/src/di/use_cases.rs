use super::{Controller, DnsServices};
use nexns_application::use_cases::{
    HandleNotificationUseCase, RefreshDomainUseCase, SyncAllDomainsUseCase, UpdateGate,
};
use std::sync::Arc;

pub struct UseCases {
    pub sync_all: Arc<SyncAllDomainsUseCase>,
    pub handle_notification: Arc<HandleNotificationUseCase>,
}

impl UseCases {
    pub fn new(controller: &Controller, dns: &DnsServices) -> Self {
        let gate = UpdateGate::new();
        let sync_all = Arc::new(
            SyncAllDomainsUseCase::new(controller.datasets.clone(), dns.index.clone())
                .with_update_gate(gate.clone()),
        );
        let refresh = Arc::new(RefreshDomainUseCase::new(
            controller.datasets.clone(),
            dns.index.clone(),
        ));
        let handle_notification = Arc::new(
            HandleNotificationUseCase::new(refresh, dns.index.clone()).with_update_gate(gate),
        );

        Self {
            sync_all,
            handle_notification,
        }
    }
}
