//! Roster routes
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /upload-excel | POST | replace the roster from a multipart `file` field |

mod handler;

use axum::{Router, extract::DefaultBodyLimit, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/upload-excel",
        post(handler::upload).layer(DefaultBodyLimit::max(20 * 1024 * 1024)), // 20MB
    )
}
