//! Audit log models

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Membership id recorded for ad-hoc numbers that are not on the roster
pub const MANUAL_MEMBERSHIP_ID: &str = "MANUAL";

/// Outcome of one send attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SendStatus {
    Simulated,
    Sent,
    Failed,
    BirthdaySimulated,
    BirthdaySent,
}

impl SendStatus {
    /// Status for an accepted send, depending on transport mode and purpose
    pub fn accepted(simulated: bool, birthday: bool) -> Self {
        match (simulated, birthday) {
            (true, false) => Self::Simulated,
            (false, false) => Self::Sent,
            (true, true) => Self::BirthdaySimulated,
            (false, true) => Self::BirthdaySent,
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simulated => "simulated",
            Self::Sent => "sent",
            Self::Failed => "failed",
            Self::BirthdaySimulated => "birthday-simulated",
            Self::BirthdaySent => "birthday-sent",
        }
    }
}

impl std::fmt::Display for SendStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable record of one send attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Monotonic sequence number, unique for the process lifetime
    pub seq: u64,
    pub membership_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub last4: String,
    pub status: SendStatus,
    /// RFC 3339 timestamp
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Kept in memory for operator diagnostics, never sent over the wire
    #[serde(skip)]
    pub password: Option<String>,
}
