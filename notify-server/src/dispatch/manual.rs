//! Ad-hoc sends to numbers typed in by an operator

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    MANUAL_MEMBERSHIP_ID, MIN_MANUAL_DIGITS, ManualSendResult, ManualSendSummary, MemberRecord,
};
use shared::util::digits_only;
use tracing::info;

use super::DispatchEngine;

pub const DEFAULT_MANUAL_MESSAGE: &str =
    "This is a notification from your membership portal. Please check your email for details.";

impl DispatchEngine {
    /// Send one message to each number, waiting for any running dispatch.
    ///
    /// Numbers with fewer than ten digits after filtering fail without a
    /// transport call or audit entry.
    pub async fn dispatch_manual(
        &self,
        numbers: &[String],
        message: Option<&str>,
    ) -> AppResult<ManualSendSummary> {
        if numbers.is_empty() {
            return Err(AppError::new(ErrorCode::NoNumbersProvided));
        }
        let text = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MANUAL_MESSAGE);

        let _guard = self.guard.lock().await;

        let mut summary = ManualSendSummary {
            total: numbers.len(),
            ..Default::default()
        };
        let recipient = MemberRecord {
            membership_id: MANUAL_MEMBERSHIP_ID.to_string(),
            ..Default::default()
        };

        for raw in numbers {
            let phone = digits_only(raw);
            if phone.len() < MIN_MANUAL_DIGITS {
                summary.fail_count += 1;
                summary.results.push(ManualSendResult {
                    input: raw.clone(),
                    phone,
                    success: false,
                    status: None,
                    error: Some(format!(
                        "Invalid phone number: need at least {MIN_MANUAL_DIGITS} digits"
                    )),
                });
                continue;
            }

            let result = match self
                .send_and_record(&recipient, &phone, text, None, false)
                .await
            {
                Ok(entry) => {
                    summary.success_count += 1;
                    ManualSendResult {
                        input: raw.clone(),
                        phone,
                        success: true,
                        status: Some(entry.status),
                        error: None,
                    }
                }
                Err(failure) => {
                    summary.fail_count += 1;
                    ManualSendResult {
                        input: raw.clone(),
                        phone,
                        success: false,
                        status: Some(failure.entry.status),
                        error: Some(failure.error.to_string()),
                    }
                }
            };
            summary.results.push(result);
        }

        info!(
            total = summary.total,
            success = summary.success_count,
            failed = summary.fail_count,
            "Manual send completed"
        );
        Ok(summary)
    }
}
