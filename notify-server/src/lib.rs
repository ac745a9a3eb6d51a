//! notify-server - membership credential and notification SMS service
//!
//! Loads a member roster from a spreadsheet, assigns login passwords, and
//! sends them by SMS in throttled batches through a pluggable transport.
//! Every attempt lands in a bounded in-memory sent log. A daily scheduler
//! sends birthday greetings.
//!
//! # Module layout
//!
//! ```text
//! notify-server/src/
//! ├── core/          # config, state, server, background tasks, errors
//! ├── api/           # HTTP routes and handlers
//! ├── roster/        # spreadsheet reading and row normalization
//! ├── dispatch/      # bulk, single, manual and birthday sends
//! ├── audit.rs       # bounded sent log
//! ├── credential.rs  # password generation
//! ├── template.rs    # message templates
//! ├── birthdays.rs   # daily birthday scheduler
//! └── utils/         # logging
//! ```

pub mod api;
pub mod audit;
pub mod birthdays;
pub mod core;
pub mod credential;
pub mod dispatch;
pub mod roster;
pub mod template;
pub mod utils;

pub use core::{Config, Server, ServerState};
pub use dispatch::{DispatchEngine, DispatchOptions};

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::init_logger_with_file;
