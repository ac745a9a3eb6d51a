//! # sms-transport
//!
//! Outbound SMS delivery - transport capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW a message leaves the process:
//! - Console simulation (no network, synthetic message ids)
//! - TextBee gateway over HTTPS
//!
//! Business logic (WHO gets WHAT) stays in the notifier service:
//! - Roster, credentials and templates → notify-server
//!
//! ## Example
//!
//! ```ignore
//! use sms_transport::{SimulatedTransport, SmsTransport};
//!
//! let transport = SimulatedTransport::new();
//! let outcome = transport.send("9876543210", "Your portal password is: Ab3$xyzw").await?;
//! assert!(outcome.accepted);
//! ```

mod error;
mod textbee;
mod transport;

// Re-exports
pub use error::{TransportError, TransportResult};
pub use textbee::{TextBeeConfig, TextBeeTransport};
pub use transport::{SendOutcome, SimulatedTransport, SmsTransport, TransportMode};
