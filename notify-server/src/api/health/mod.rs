//! Health check
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /health | GET | liveness plus roster, audit and transport status |

use std::sync::OnceLock;
use std::time::Instant;

use axum::{Router, extract::State, routing::get};
use serde::Serialize;
use shared::error::ApiResponse;
use sms_transport::TransportMode;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_seconds: u64,
    members: usize,
    members_with_phone: usize,
    audit_entries: usize,
    audit_capacity: usize,
    transport: TransportMode,
    dispatch_active: bool,
}

static START_TIME: OnceLock<Instant> = OnceLock::new();

async fn health(State(state): State<ServerState>) -> ApiResponse<HealthResponse> {
    let started = START_TIME.get_or_init(Instant::now);

    ApiResponse::success(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: started.elapsed().as_secs(),
        members: state.roster.len(),
        members_with_phone: state.roster.with_phone_count(),
        audit_entries: state.audit.len(),
        audit_capacity: state.audit.capacity(),
        transport: state.engine.transport_mode(),
        dispatch_active: state.engine.is_busy(),
    })
}
