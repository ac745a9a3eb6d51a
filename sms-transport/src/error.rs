//! Error types for the transport library

use thiserror::Error;

/// Transport error types
#[derive(Debug, Error)]
pub enum TransportError {
    /// Vendor credentials missing from configuration
    #[error("SMS transport not configured: {0}")]
    NotConfigured(String),

    /// Provider answered but did not accept the message
    #[error("Provider rejected message (HTTP {status}): {raw}")]
    Rejected {
        status: u16,
        raw: serde_json::Value,
    },

    /// Request timed out
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Network or protocol failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Recipient could not be turned into a dialable number
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),
}

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;
