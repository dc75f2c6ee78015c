mod handle_notification;
mod refresh_domain;
mod sync_all_domains;
mod update_gate;

pub use handle_notification::HandleNotificationUseCase;
pub use refresh_domain::RefreshDomainUseCase;
pub use sync_all_domains::{SyncAllDomainsUseCase, SyncSummary};
pub use update_gate::UpdateGate;
