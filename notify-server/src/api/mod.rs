//! HTTP API
//!
//! - [`health`] - liveness and counters
//! - [`send`] - single, bulk, manual and birthday sends
//! - [`templates`] - message template read/update
//! - [`roster`] - spreadsheet upload
//! - [`logs`] - recent sent-log entries

pub mod health;
pub mod logs;
pub mod roster;
pub mod send;
pub mod templates;

use axum::Router;
use axum::body::Bytes;
use serde::de::DeserializeOwned;
use shared::error::{AppError, AppResult};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(send::router())
        .merge(templates::router())
        .merge(roster::router())
        .merge(logs::router())
}

/// Router with middleware and state, used by the server and by tests
pub fn build_app(state: ServerState) -> Router {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Decode an optional JSON body; an empty body yields `T::default()`
pub(crate) fn json_body<T: DeserializeOwned + Default>(body: &Bytes) -> AppResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::invalid_request(format!("Invalid JSON body: {}", e)))
}
