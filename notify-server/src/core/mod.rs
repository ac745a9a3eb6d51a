//! Core module: configuration, state, server and errors
//!
//! - [`Config`] - environment configuration
//! - [`ServerState`] - shared application state
//! - [`Server`] - HTTP server
//! - [`BackgroundTasks`] - long-lived task registry
//! - [`ServiceError`] - infrastructure error bridge

pub mod config;
pub mod error;
pub mod server;
pub mod state;
pub mod tasks;

pub use config::Config;
pub use error::{BoxError, ServiceError, ServiceResult};
pub use server::Server;
pub use state::ServerState;
pub use tasks::{BackgroundTasks, TaskKind};
