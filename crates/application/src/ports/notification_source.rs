use async_trait::async_trait;
use nexns_domain::{DatasetNotification, DomainError};

#[async_trait]
pub trait NotificationSource: Send + Sync {
    /// Opens a new long-lived notification channel.
    async fn connect(&self) -> Result<Box<dyn NotificationStream>, DomainError>;
}

#[async_trait]
pub trait NotificationStream: Send {
    /// Next event in receipt order; `Ok(None)` once the peer closed the channel.
    async fn next_event(&mut self) -> Result<Option<DatasetNotification>, DomainError>;
}
