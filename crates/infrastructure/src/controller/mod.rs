//! Control-plane transport: dataset dumps and change notifications.
//!
//! Endpoints, relative to `[controller] url`:
//! ```text
//! GET api/v1/domain/dump/          full dataset, JSON array
//! GET api/v1/domain/{id}/dump/     one dataset, JSON object
//! WS  api/v1/ws/client-notify/     one JSON event per message, kept open
//! ```
//! Every request carries `X-CLIENT-ID` and `X-CLIENT-SECRET`. The websocket
//! URL is the dump URL with `http`/`https` swapped for `ws`/`wss`.

mod client;
mod notifications;

pub use client::ControllerClient;
pub use notifications::{websocket_url, ControllerNotificationSource, WebSocketNotificationStream};

use nexns_domain::config::ControllerConfig;
use nexns_domain::DomainError;

const CLIENT_ID_HEADER: &str = "X-CLIENT-ID";
const CLIENT_SECRET_HEADER: &str = "X-CLIENT-SECRET";
const USER_AGENT: &str = concat!("nexns/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
struct Credentials {
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl Credentials {
    fn from_config(config: &ControllerConfig) -> Result<Self, DomainError> {
        if config.url.trim().is_empty() {
            return Err(DomainError::ConfigError(
                "controller url is not configured".to_string(),
            ));
        }
        Ok(Self {
            base_url: config.base_url(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, http: &reqwest::Client, path: &str) -> reqwest::RequestBuilder {
        http.get(self.url(path))
            .header(CLIENT_ID_HEADER, &self.client_id)
            .header(CLIENT_SECRET_HEADER, &self.client_secret)
    }
}

fn status_error(response: &reqwest::Response) -> DomainError {
    DomainError::ControllerStatus {
        status: response.status().as_u16(),
        url: response.url().to_string(),
    }
}
