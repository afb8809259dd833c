//! HTTP surface for the critique session: evaluate, history, save, rules.
//!
//! Requests share one session behind an async mutex, so actions run one at a
//! time in arrival order.

mod handlers;
mod types;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

use crate::error::WhispererError;
use crate::session::CritiqueSession;

pub use types::{EvaluateRequest, EvaluateResponse, HistoryRow, SaveResponse};

/// State shared by all handlers.
#[derive(Clone)]
pub struct ServerState {
    pub session: Arc<Mutex<CritiqueSession>>,
}

/// HTTP server wrapping a single critique session.
pub struct Server {
    state: ServerState,
}

impl Server {
    pub fn new(session: CritiqueSession) -> Self {
        Self {
            state: ServerState {
                session: Arc::new(Mutex::new(session)),
            },
        }
    }

    pub fn state(&self) -> ServerState {
        self.state.clone()
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/evaluate", post(handlers::handle_evaluate))
            .route("/history", get(handlers::handle_history))
            .route("/history/save", post(handlers::handle_save))
            .route("/rules", get(handlers::handle_rules))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Binds `addr` and serves until the process stops.
    pub async fn run(self, addr: &str) -> Result<(), WhispererError> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        log::info!("listening on {}", listener.local_addr()?);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}
