pub mod dataset_resync;
pub mod notification_listener;
pub mod runner;

pub use dataset_resync::DatasetResyncJob;
pub use notification_listener::{ListenerState, NotificationListenerJob};
pub use runner::JobRunner;
