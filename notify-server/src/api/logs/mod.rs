//! Sent-log routes
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /sent-logs?limit=N | GET | newest `N` audit entries (default 200) |
//!
//! A missing, zero or non-numeric `limit` falls back to the default.

use axum::{
    Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use shared::error::ApiResponse;
use shared::models::AuditLogEntry;

use crate::core::ServerState;

pub const DEFAULT_LOG_LIMIT: usize = 200;

pub fn router() -> Router<ServerState> {
    Router::new().route("/sent-logs", get(sent_logs))
}

#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    pub limit: Option<String>,
}

impl LogsQuery {
    pub fn limit(&self) -> usize {
        self.limit
            .as_deref()
            .and_then(|l| l.trim().parse::<usize>().ok())
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_LOG_LIMIT)
    }
}

async fn sent_logs(
    State(state): State<ServerState>,
    Query(query): Query<LogsQuery>,
) -> ApiResponse<Vec<AuditLogEntry>> {
    ApiResponse::success(state.audit.recent(query.limit()))
}
