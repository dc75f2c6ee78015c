use serde::{Deserialize, Serialize};

/// Where datasets and change notifications come from.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ControllerConfig {
    /// Base URL of the controller, e.g. `http://controller:8000/`
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub client_id: String,

    #[serde(default)]
    pub client_secret: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Fixed delay between notification channel reconnect attempts
    #[serde(default = "default_reconnect_backoff_secs")]
    pub reconnect_backoff_secs: u64,

    /// Full resync period; 0 disables it
    #[serde(default)]
    pub resync_interval_secs: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
            reconnect_backoff_secs: default_reconnect_backoff_secs(),
            resync_interval_secs: 0,
        }
    }
}

impl ControllerConfig {
    /// Base URL with exactly one trailing slash, so endpoints can be appended.
    pub fn base_url(&self) -> String {
        format!("{}/", self.url.trim().trim_end_matches('/'))
    }
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_reconnect_backoff_secs() -> u64 {
    5
}
