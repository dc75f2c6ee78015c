use serde::{Deserialize, Serialize};

/// Event pushed by the controller when a domain's dataset changed.
///
/// It only identifies the domain; the dataset itself is re-fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetNotification {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub action: String,
    pub domain: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
    Refresh,
    Delete,
}

impl DatasetNotification {
    pub fn new(domain: i64, action: &str) -> Self {
        Self {
            kind: "domain".to_string(),
            action: action.to_string(),
            domain,
        }
    }

    pub fn action(&self) -> NotificationAction {
        if self.action.eq_ignore_ascii_case("delete") {
            NotificationAction::Delete
        } else {
            NotificationAction::Refresh
        }
    }
}
