//! Data models
//!
//! Shared between the notifier service and its HTTP clients.
//! Request payloads accept the camelCase names the operator UI sends.

pub mod audit;
pub mod dispatch;
pub mod member;
pub mod template;

// Re-exports
pub use audit::*;
pub use dispatch::*;
pub use member::*;
pub use template::*;
