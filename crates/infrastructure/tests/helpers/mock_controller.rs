use axum::extract::ws::{Message, WebSocketUpgrade};
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const NOTIFY_PATH: &str = "/api/v1/ws/client-notify/";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone)]
struct Route {
    path: String,
    status: StatusCode,
    body: String,
}

#[derive(Clone)]
struct MockState {
    routes: Arc<Vec<Route>>,
    notifications: Option<Arc<Vec<String>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockState {
    fn record(&self, uri: &Uri, headers: &HeaderMap) {
        let headers = headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        self.requests.lock().unwrap().push(RecordedRequest {
            path: uri.path().to_string(),
            headers,
        });
    }
}

/// Controller stand-in: one canned JSON response per path, 404 otherwise.
///
/// With notifications configured, the websocket endpoint sends each entry
/// as a text message and then closes.
pub struct MockController {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockController {
    pub async fn start(routes: Vec<(&str, u16, String)>) -> Self {
        Self::serve(routes, None).await
    }

    pub async fn with_notifications(messages: Vec<&str>) -> Self {
        let messages = messages.into_iter().map(str::to_string).collect();
        Self::serve(Vec::new(), Some(Arc::new(messages))).await
    }

    async fn serve(
        routes: Vec<(&str, u16, String)>,
        notifications: Option<Arc<Vec<String>>>,
    ) -> Self {
        let state = MockState {
            routes: Arc::new(
                routes
                    .into_iter()
                    .map(|(path, status, body)| Route {
                        path: path.to_string(),
                        status: StatusCode::from_u16(status).unwrap(),
                        body,
                    })
                    .collect(),
            ),
            notifications,
            requests: Arc::new(Mutex::new(Vec::new())),
        };
        let requests = state.requests.clone();

        let mut app = Router::new();
        if state.notifications.is_some() {
            app = app.route(NOTIFY_PATH, any(notify));
        }
        let app = app.fallback(canned).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, requests }
    }

    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn canned(State(state): State<MockState>, uri: Uri, headers: HeaderMap) -> Response {
    state.record(&uri, &headers);

    let (status, body) = state
        .routes
        .iter()
        .find(|route| route.path == uri.path())
        .map(|route| (route.status, route.body.clone()))
        .unwrap_or((StatusCode::NOT_FOUND, "{\"detail\":\"not found\"}".to_string()));

    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn notify(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Response {
    state.record(&uri, &headers);
    let messages = state.notifications.clone().unwrap_or_default();

    ws.on_upgrade(move |mut socket| async move {
        for message in messages.iter() {
            if socket.send(Message::Text(message.clone().into())).await.is_err() {
                return;
            }
        }
        let _ = socket.send(Message::Close(None)).await;
    })
}
