use std::{
    net::{IpAddr, SocketAddr},
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing, Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, task::JoinHandle};
use tracing::{info, warn};

const DESTINATION_ROUTE: &str = "/:destination";

/// Start a server which accepts webhook and email api requests on
/// `/<destination>` and logs their contents.
///
/// Requests to one of the `fail` destinations are answered with
/// `500 Internal Server Error`.
pub async fn start_server(host: IpAddr, port: u16, fail: Vec<String>) -> anyhow::Result<()> {
    info!("Starting webhook testing server on {host}:{port}");
    for destination in ["discord", "email", "slack"] {
        info!("Endpoint for {destination}: http://{host}:{port}/{destination}");
    }
    if !fail.is_empty() {
        info!("Failing destinations: {fail:?}");
    }

    let state = Arc::new(ServerState::new(fail, None));
    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(state))
        .await
        .context("Failed to start HTTP server")
}

/// In-process webhook server which records every request it receives.
#[derive(Debug)]
pub struct CaptureServer {
    addr: SocketAddr,
    state: Arc<ServerState>,
    handle: JoinHandle<()>,
}

/// A request received by the [`CaptureServer`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub path: String,
    pub headers: HeaderMap,
    pub body: Value,
}

impl CaptureServer {
    /// Bind to a random port on localhost.
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(Vec::new(), None).await
    }

    /// Bind to a random port on localhost. Requests to the `fail` destinations
    /// are answered with an error, and every response is held back for
    /// `delay` if set.
    pub async fn start_with(fail: Vec<String>, delay: Option<Duration>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind((IpAddr::from([127, 0, 0, 1]), 0))
            .await
            .context("Failed to bind capture server")?;
        let addr = listener.local_addr()?;

        let state = Arc::new(ServerState::new(fail, delay));
        let router = router(Arc::clone(&state));
        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, router).await {
                warn!("Capture server stopped: {err}");
            }
        });

        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    pub fn url(&self, destination: &str) -> String {
        format!("http://{}/{destination}", self.addr)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state.requests()
    }

    pub fn requests_to(&self, destination: &str) -> Vec<CapturedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.path == destination)
            .collect()
    }
}

impl Drop for CaptureServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Debug)]
struct ServerState {
    requests: Mutex<Vec<CapturedRequest>>,
    fail: Vec<String>,
    delay: Option<Duration>,
}

impl ServerState {
    fn new(fail: Vec<String>, delay: Option<Duration>) -> Self {
        Self {
            requests: Mutex::default(),
            fail,
            delay,
        }
    }

    fn requests(&self) -> Vec<CapturedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn record(&self, request: CapturedRequest) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
    }
}

fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route(DESTINATION_ROUTE, routing::post(capture))
        .with_state(state)
}

async fn capture(
    State(state): State<Arc<ServerState>>,
    Path(destination): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let body = serde_json::from_slice(&body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));
    info!(%destination, %body, "Received request");

    state.record(CapturedRequest {
        path: destination.clone(),
        headers,
        body,
    });

    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }

    if state.fail.contains(&destination) {
        warn!(%destination, "Failing request");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "destination unavailable"})),
        );
    }

    (StatusCode::OK, Json(json!({"ok": true})))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn records_requests() {
        // Arrange
        let server = CaptureServer::start().await.unwrap();

        // Act
        let response = reqwest::Client::new()
            .post(server.url("discord"))
            .header("X-Test", "42")
            .body(r#"{"hello": "world"}"#)
            .send()
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let requests = server.requests_to("discord");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].body, json!({"hello": "world"}));
        assert_eq!(requests[0].headers["x-test"], "42");
        assert!(server.requests_to("slack").is_empty());
    }

    #[tokio::test]
    async fn failing_destination() {
        // Arrange
        let server = CaptureServer::start_with(vec!["slack".into()], None)
            .await
            .unwrap();

        // Act
        let response = reqwest::Client::new()
            .post(server.url("slack"))
            .body("plain text")
            .send()
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(server.requests()[0].body, json!("plain text"));
    }
}
