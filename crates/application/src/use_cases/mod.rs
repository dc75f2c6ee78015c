pub mod datasets;

pub use datasets::{
    HandleNotificationUseCase, RefreshDomainUseCase, SyncAllDomainsUseCase, SyncSummary,
    UpdateGate,
};
