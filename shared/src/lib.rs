//! Shared types for the roster notifier
//!
//! Common types used across the workspace: the unified error system,
//! API response envelope, roster/audit/dispatch models and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
