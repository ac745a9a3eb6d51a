//! Dispatch request and result models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::audit::SendStatus;

/// Maximum number of failure messages kept in a [`DispatchSummary`]
pub const MAX_SAMPLE_ERRORS: usize = 10;

/// Manual sends need at least this many digits after filtering
pub const MIN_MANUAL_DIGITS: usize = 10;

/// Failure sample with the member it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchFailure {
    pub key: String,
    pub error: String,
}

/// Aggregate result of a bulk dispatch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchSummary {
    /// Members attempted (skipped members are not counted)
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    /// Members without a phone or membership id
    pub skipped: usize,
    pub batches: usize,
    pub sample_errors: Vec<DispatchFailure>,
}

impl DispatchSummary {
    pub fn record_success(&mut self) {
        self.total += 1;
        self.successful += 1;
    }

    pub fn record_failure(&mut self, key: impl Into<String>, error: impl Into<String>) {
        self.total += 1;
        self.failed += 1;
        if self.sample_errors.len() < MAX_SAMPLE_ERRORS {
            self.sample_errors.push(DispatchFailure {
                key: key.into(),
                error: error.into(),
            });
        }
    }

    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }
}

/// `POST /bulk-send` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSendRequest {
    pub batch_size: Option<usize>,
    pub delay_ms: Option<u64>,
    pub start: Option<usize>,
    pub limit: Option<usize>,
}

/// `POST /send-password` body
///
/// Spreadsheets often store ids as numbers, so both JSON strings and numbers
/// are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendPasswordRequest {
    pub membership_id: Option<Value>,
}

impl SendPasswordRequest {
    /// Trimmed id, `None` when missing or blank
    pub fn membership_id(&self) -> Option<String> {
        let id = match self.membership_id.as_ref()? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        (!id.is_empty()).then_some(id)
    }
}

/// Result of a single-member send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendPasswordResponse {
    pub membership_id: String,
    pub status: SendStatus,
    pub last4: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `POST /send-manual-numbers` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManualSendRequest {
    #[serde(default)]
    pub numbers: Vec<String>,
    pub message: Option<String>,
}

/// Per-number outcome of a manual send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualSendResult {
    /// Number as supplied by the operator
    pub input: String,
    /// Digits-only form actually dialled
    pub phone: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SendStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate result of a manual send
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualSendSummary {
    pub total: usize,
    pub success_count: usize,
    pub fail_count: usize,
    pub results: Vec<ManualSendResult>,
}

/// Result of a birthday run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthdaySummary {
    /// Day and month matched, `DD/MM`
    pub date: String,
    pub matched: usize,
    pub successful: usize,
    pub failed: usize,
}

/// Result of a roster upload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    pub loaded: usize,
    pub with_phone: usize,
}
