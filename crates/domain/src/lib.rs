//! nexns domain layer: the authoritative dataset model and its configuration.
pub mod config;
pub mod dataset;
pub mod dns_record;
pub mod dns_request;
pub mod domain_name;
pub mod errors;
pub mod notification;

pub use config::{CliOverrides, Config, ConfigError};
pub use dataset::{validate_dataset, DatasetIssue, Domain, DomainData, RRSet, Record, Zone};
pub use dns_record::{RecordData, RecordType};
pub use dns_request::DnsRequest;
pub use errors::DomainError;
pub use notification::{DatasetNotification, NotificationAction};
