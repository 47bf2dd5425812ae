//! Fake rules API server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves `GET /api/rules` with a configurable status and body.
//!
//! # Example
//!
//! ```rust,ignore
//! let api = FakeRulesApi::start().await.unwrap();
//! api.serve(StatusCode::OK, SCENARIO_JSON).await;
//! let source = HttpSource::new(api.rules_url());
//! ```

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// State shared between the router and test code.
struct ApiState {
    status: StatusCode,
    body: String,
    hits: usize,
}

/// Handle to the running fake rules API server.
pub struct FakeRulesApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeRulesApi {
    /// Start the server on a random port, serving an empty rule array.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState {
            status: StatusCode::OK,
            body: "[]".to_string(),
            hits: 0,
        }));

        let app = Router::new()
            .route("/api/rules", get(rules))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Full URL of the rules endpoint.
    pub fn rules_url(&self) -> String {
        format!("http://{}/api/rules", self.addr)
    }

    /// Set what the next requests receive.
    pub async fn serve(&self, status: StatusCode, body: impl Into<String>) {
        let mut state = self.state.lock().await;
        state.status = status;
        state.body = body.into();
    }

    /// Number of requests served so far.
    pub async fn hits(&self) -> usize {
        self.state.lock().await.hits
    }
}

async fn rules(State(state): State<Arc<Mutex<ApiState>>>) -> impl IntoResponse {
    let mut state = state.lock().await;
    state.hits += 1;
    (
        state.status,
        [(axum::http::header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}
