use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Malformed {record_type} record at {owner}: {reason}")]
    MalformedRecord {
        owner: String,
        record_type: String,
        reason: String,
    },

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Controller request failed: {0}")]
    ControllerRequest(String),

    #[error("Controller returned HTTP {status} for {url}")]
    ControllerStatus { status: u16, url: String },

    #[error("Notification channel error: {0}")]
    NotificationChannel(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    pub fn malformed(owner: &str, record_type: &str, reason: impl Into<String>) -> Self {
        DomainError::MalformedRecord {
            owner: owner.to_string(),
            record_type: record_type.to_string(),
            reason: reason.into(),
        }
    }
}
