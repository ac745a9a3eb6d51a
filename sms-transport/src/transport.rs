//! Transport trait and the simulated adapter

use crate::error::TransportResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Which kind of transport is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Simulated,
    Live,
}

impl TransportMode {
    pub fn is_simulated(&self) -> bool {
        matches!(self, Self::Simulated)
    }
}

/// Result of an accepted send
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendOutcome {
    pub accepted: bool,
    pub provider_message_id: Option<String>,
    /// Provider response body, or a synthetic one in simulation
    pub raw: serde_json::Value,
}

/// Trait for SMS transport adapters
#[async_trait]
pub trait SmsTransport: Send + Sync {
    /// Deliver `text` to `phone`. One outbound call per invocation.
    async fn send(&self, phone: &str, text: &str) -> TransportResult<SendOutcome>;

    fn mode(&self) -> TransportMode;
}

/// Console transport
///
/// Never touches the network. Every send succeeds with a sequential id.
#[derive(Debug, Default)]
pub struct SimulatedTransport {
    counter: AtomicU64,
}

impl SimulatedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("sim-{:08}", n)
    }
}

#[async_trait]
impl SmsTransport for SimulatedTransport {
    async fn send(&self, phone: &str, text: &str) -> TransportResult<SendOutcome> {
        let id = self.next_id();
        info!(phone = %phone, message_id = %id, "[SIMULATION] SMS: \"{}\"", text);

        Ok(SendOutcome {
            accepted: true,
            provider_message_id: Some(id.clone()),
            raw: serde_json::json!({ "status": "simulated", "id": id }),
        })
    }

    fn mode(&self) -> TransportMode {
        TransportMode::Simulated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulated_ids_are_sequential() {
        let transport = SimulatedTransport::new();

        let first = transport.send("9876543210", "hello").await.unwrap();
        let second = transport.send("9876543210", "hello").await.unwrap();

        assert!(first.accepted);
        assert_eq!(first.provider_message_id.as_deref(), Some("sim-00000001"));
        assert_eq!(second.provider_message_id.as_deref(), Some("sim-00000002"));
        assert_eq!(first.raw["status"], "simulated");
    }

    #[test]
    fn test_mode() {
        assert!(SimulatedTransport::new().mode().is_simulated());
        assert!(!TransportMode::Live.is_simulated());
        assert_eq!(
            serde_json::to_string(&TransportMode::Live).unwrap(),
            "\"live\""
        );
    }
}
