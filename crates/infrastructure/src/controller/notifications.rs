use super::{Credentials, CLIENT_ID_HEADER, CLIENT_SECRET_HEADER, USER_AGENT};
use async_trait::async_trait;
use futures::StreamExt;
use nexns_application::ports::{NotificationSource, NotificationStream};
use nexns_domain::config::ControllerConfig;
use nexns_domain::{DatasetNotification, DomainError};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_tungstenite::tungstenite::http::{HeaderName, HeaderValue};
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};

const NOTIFY_PATH: &str = "api/v1/ws/client-notify/";

/// Opens the controller's notification websocket.
pub struct ControllerNotificationSource {
    credentials: Credentials,
    connect_timeout: Duration,
}

impl ControllerNotificationSource {
    /// The socket stays open indefinitely, so only the handshake is bounded
    /// by the request timeout.
    pub fn new(config: &ControllerConfig) -> Result<Self, DomainError> {
        Ok(Self {
            credentials: Credentials::from_config(config)?,
            connect_timeout: Duration::from_secs(config.request_timeout_secs.max(1)),
        })
    }

    fn request(&self) -> Result<Request, DomainError> {
        let url = websocket_url(&self.credentials.url(NOTIFY_PATH))?;
        let mut request = url
            .as_str()
            .into_client_request()
            .map_err(|e| DomainError::ConfigError(format!("{}: {}", url, e)))?;

        let headers = request.headers_mut();
        for (name, value) in [
            (CLIENT_ID_HEADER, self.credentials.client_id.as_str()),
            (CLIENT_SECRET_HEADER, self.credentials.client_secret.as_str()),
            ("User-Agent", USER_AGENT),
        ] {
            let invalid = |e: &dyn std::fmt::Display| {
                DomainError::ConfigError(format!("{} header: {}", name, e))
            };
            let header = HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(&e))?;
            let value = HeaderValue::from_str(value).map_err(|e| invalid(&e))?;
            headers.insert(header, value);
        }
        Ok(request)
    }
}

/// The notification endpoint lives on the same host as the dump API, with
/// the scheme swapped to its websocket counterpart.
pub fn websocket_url(http_url: &str) -> Result<String, DomainError> {
    if let Some(rest) = http_url.strip_prefix("https://") {
        return Ok(format!("wss://{}", rest));
    }
    if let Some(rest) = http_url.strip_prefix("http://") {
        return Ok(format!("ws://{}", rest));
    }
    if http_url.starts_with("wss://") || http_url.starts_with("ws://") {
        return Ok(http_url.to_string());
    }
    Err(DomainError::ConfigError(format!(
        "unsupported controller url scheme: {}",
        http_url
    )))
}

#[async_trait]
impl NotificationSource for ControllerNotificationSource {
    async fn connect(&self) -> Result<Box<dyn NotificationStream>, DomainError> {
        let request = self.request()?;
        let url = request.uri().to_string();

        let handshake = tokio::time::timeout(self.connect_timeout, connect_async(request))
            .await
            .map_err(|_| {
                DomainError::NotificationChannel(format!("{}: handshake timed out", url))
            })?;
        let (socket, _) = handshake.map_err(|e| match e {
            WsError::Http(response) => DomainError::ControllerStatus {
                status: response.status().as_u16(),
                url: url.clone(),
            },
            other => DomainError::NotificationChannel(other.to_string()),
        })?;

        debug!(url = %url, "Notification channel opened");
        Ok(Box::new(WebSocketNotificationStream::new(socket)))
    }
}

/// One JSON event per websocket message.
///
/// A message that is not a valid event is logged and skipped without
/// closing the socket. Control frames are handled by the protocol layer.
pub struct WebSocketNotificationStream {
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketNotificationStream {
    pub fn new(socket: WebSocketStream<MaybeTlsStream<TcpStream>>) -> Self {
        Self { socket }
    }
}

pub fn parse_event(payload: &[u8]) -> Option<DatasetNotification> {
    let payload = payload.trim_ascii();
    if payload.is_empty() {
        return None;
    }
    match serde_json::from_slice::<DatasetNotification>(payload) {
        Ok(event) => Some(event),
        Err(e) => {
            warn!(
                error = %e,
                payload = %String::from_utf8_lossy(payload),
                "Skipping unparseable notification"
            );
            None
        }
    }
}

#[async_trait]
impl NotificationStream for WebSocketNotificationStream {
    async fn next_event(&mut self) -> Result<Option<DatasetNotification>, DomainError> {
        while let Some(message) = self.socket.next().await {
            let event = match message {
                Ok(Message::Text(text)) => parse_event(text.as_bytes()),
                Ok(Message::Binary(data)) => parse_event(&data),
                Ok(Message::Close(frame)) => {
                    debug!(frame = ?frame, "Notification channel closed by controller");
                    return Ok(None);
                }
                Ok(_) => None,
                Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => return Ok(None),
                Err(e) => return Err(DomainError::NotificationChannel(e.to_string())),
            };
            if let Some(event) = event {
                return Ok(Some(event));
            }
        }
        Ok(None)
    }
}
