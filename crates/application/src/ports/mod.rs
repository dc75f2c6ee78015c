mod dataset_source;
mod domain_store;
mod notification_source;

pub use dataset_source::DatasetSource;
pub use domain_store::DomainStore;
pub use notification_source::{NotificationSource, NotificationStream};
