//! Send routes
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /send-password | POST | one member's credentials |
//! | /bulk-send | POST | batched run over a roster range |
//! | /send-manual-numbers | POST | fixed message to typed-in numbers |
//! | /birthday-send | POST | run today's birthday greetings now |

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/send-password", post(handler::send_password))
        .route("/bulk-send", post(handler::bulk_send))
        .route("/send-manual-numbers", post(handler::send_manual))
        .route("/birthday-send", post(handler::birthday_send))
}
