//! Bulk dispatch engine
//!
//! Walks the roster in fixed-size batches, assigns missing passwords, renders
//! the password template, sends through the configured transport and records
//! one audit entry per attempt.
//!
//! All dispatches share one guard: bulk runs are rejected while another
//! dispatch holds it, single/manual/birthday sends wait for it.

mod birthday;
mod manual;

pub use birthday::{birthday_matches, parse_day_month};
pub use manual::DEFAULT_MANUAL_MESSAGE;

use std::sync::Arc;
use std::time::Duration;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    AuditLogEntry, DispatchSummary, MemberRecord, SendPasswordResponse, SendStatus,
};
use sms_transport::{SmsTransport, TransportError, TransportMode};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::audit::{AuditDraft, AuditLog};
use crate::credential;
use crate::roster::RosterStore;
use crate::template::TemplateStore;

/// Bulk run parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOptions {
    pub batch_size: usize,
    pub delay: Duration,
    pub start: usize,
    /// Members to process from `start`; `None` means the rest of the roster
    pub limit: Option<usize>,
}

/// What happened to one member
#[derive(Debug)]
pub enum MemberOutcome {
    Skipped(SkipReason),
    Sent(AuditLogEntry),
    Failed(AuditLogEntry, TransportError),
}

/// A recorded attempt the transport did not accept
#[derive(Debug)]
pub struct SendFailure {
    pub entry: AuditLogEntry,
    pub error: TransportError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoPhone,
    NoMembershipId,
}

pub struct DispatchEngine {
    roster: Arc<RosterStore>,
    audit: Arc<AuditLog>,
    templates: Arc<TemplateStore>,
    transport: Arc<dyn SmsTransport>,
    guard: Mutex<()>,
}

impl DispatchEngine {
    pub fn new(
        roster: Arc<RosterStore>,
        audit: Arc<AuditLog>,
        templates: Arc<TemplateStore>,
        transport: Arc<dyn SmsTransport>,
    ) -> Self {
        Self {
            roster,
            audit,
            templates,
            transport,
            guard: Mutex::new(()),
        }
    }

    pub fn transport_mode(&self) -> TransportMode {
        self.transport.mode()
    }

    /// Whether a dispatch currently holds the guard
    pub fn is_busy(&self) -> bool {
        self.guard.try_lock().is_err()
    }

    /// Hold the guard without waiting, e.g. while the roster is replaced
    pub fn try_reserve(&self) -> AppResult<MutexGuard<'_, ()>> {
        self.guard
            .try_lock()
            .map_err(|_| AppError::new(ErrorCode::RosterLocked))
    }

    /// Send passwords to members in `[start, start + limit)`, batch by batch.
    ///
    /// Transport failures are counted, never fatal. Members without a phone
    /// or membership id are skipped and excluded from `total`.
    pub async fn dispatch(&self, opts: DispatchOptions) -> AppResult<DispatchSummary> {
        if opts.batch_size == 0 {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                "batchSize must be greater than 0",
            )
            .with_detail("field", "batchSize"));
        }

        let _guard = self
            .guard
            .try_lock()
            .map_err(|_| AppError::dispatch_in_progress())?;

        let len = self.roster.len();
        if opts.limit == Some(0) || opts.start >= len {
            return Err(AppError::new(ErrorCode::NothingToProcess)
                .with_detail("start", opts.start)
                .with_detail("roster_size", len));
        }
        let end = opts
            .limit
            .map_or(len, |limit| opts.start.saturating_add(limit).min(len));

        let members = self.roster.slice(opts.start, end);
        let batch_count = members.len().div_ceil(opts.batch_size);
        info!(
            start = opts.start,
            end,
            batch_size = opts.batch_size,
            batches = batch_count,
            "Bulk dispatch started"
        );

        let mut summary = DispatchSummary::default();
        for (batch_idx, batch) in members.chunks(opts.batch_size).enumerate() {
            summary.batches += 1;
            debug!(
                "Sending batch {} (members {} to {})",
                batch_idx + 1,
                batch[0].0 + 1,
                batch[0].0 + batch.len()
            );

            for (index, member) in batch {
                match self.process_member(*index, member.clone()).await {
                    MemberOutcome::Sent(_) => summary.record_success(),
                    MemberOutcome::Failed(_, err) => {
                        summary.record_failure(member.display_key(), err.to_string())
                    }
                    MemberOutcome::Skipped(reason) => {
                        debug!(member = %member.display_key(), ?reason, "Member skipped");
                        summary.record_skip();
                    }
                }
            }

            if batch_idx + 1 < batch_count && !opts.delay.is_zero() {
                debug!("Waiting {} ms before next batch", opts.delay.as_millis());
                tokio::time::sleep(opts.delay).await;
            }
        }

        info!(
            total = summary.total,
            successful = summary.successful,
            failed = summary.failed,
            skipped = summary.skipped,
            batches = summary.batches,
            "Bulk dispatch completed"
        );
        Ok(summary)
    }

    /// Send one member their password, waiting for any running dispatch.
    pub async fn dispatch_one(&self, membership_id: &str) -> AppResult<SendPasswordResponse> {
        let _guard = self.guard.lock().await;

        let (index, member) = self
            .roster
            .find(membership_id)
            .ok_or_else(|| AppError::member_not_found(membership_id))?;

        match self.process_member(index, member).await {
            MemberOutcome::Sent(entry) => Ok(SendPasswordResponse {
                membership_id: entry.membership_id,
                status: entry.status,
                last4: entry.last4,
                error: None,
            }),
            MemberOutcome::Failed(entry, err) => Err(transport_app_error(&err)
                .with_detail("membership_id", entry.membership_id)
                .with_detail("last4", entry.last4)),
            MemberOutcome::Skipped(SkipReason::NoPhone) => Err(AppError::new(
                ErrorCode::MemberUnreachable,
            )
            .with_detail("membership_id", membership_id)),
            // find() matched a non-empty id, so this cannot be an id-less member
            MemberOutcome::Skipped(SkipReason::NoMembershipId) => {
                Err(AppError::member_not_found(membership_id))
            }
        }
    }

    /// Per-member step shared by bulk and single sends
    async fn process_member(&self, index: usize, member: MemberRecord) -> MemberOutcome {
        let Some(phone) = member.effective_phone().map(str::to_string) else {
            return MemberOutcome::Skipped(SkipReason::NoPhone);
        };
        if member.membership_id.is_empty() {
            return MemberOutcome::Skipped(SkipReason::NoMembershipId);
        }

        let (member, generated) = credential::assign_credential(member, &mut rand::thread_rng());
        if generated && !self.roster.write_back(index, &member) {
            warn!(member = %member.membership_id, "Roster changed before password could be stored");
        }
        let password = member.password.clone().unwrap_or_default();
        let text = self.templates.render_password(&member, &password);

        match self
            .send_and_record(&member, &phone, &text, Some(password), false)
            .await
        {
            Ok(entry) => MemberOutcome::Sent(entry),
            Err(failure) => MemberOutcome::Failed(failure.entry, failure.error),
        }
    }

    /// Send `text` and record exactly one audit entry for the attempt
    async fn send_and_record(
        &self,
        member: &MemberRecord,
        phone: &str,
        text: &str,
        password: Option<String>,
        birthday: bool,
    ) -> Result<AuditLogEntry, SendFailure> {
        let simulated = self.transport.mode().is_simulated();
        let result = match self.transport.send(phone, text).await {
            Ok(outcome) if outcome.accepted => Ok(outcome),
            Ok(outcome) => Err(TransportError::Rejected {
                status: 200,
                raw: outcome.raw,
            }),
            Err(err) => Err(err),
        };

        let mut draft = AuditDraft {
            membership_id: member.membership_id.clone(),
            name: member.name.clone(),
            email: member.email.clone(),
            phone: phone.to_string(),
            status: SendStatus::accepted(simulated, birthday),
            provider_result: None,
            error: None,
            password,
        };

        match result {
            Ok(outcome) => {
                draft.provider_result = Some(outcome.raw);
                Ok(self.audit.record(draft))
            }
            Err(err) => {
                warn!(member = %member.display_key(), error = %err, "SMS send failed");
                draft.status = SendStatus::Failed;
                draft.error = Some(err.to_string());
                if let TransportError::Rejected { raw, .. } = &err {
                    draft.provider_result = Some(raw.clone());
                }
                Err(SendFailure {
                    entry: self.audit.record(draft),
                    error: err,
                })
            }
        }
    }
}

/// Map a transport failure onto the HTTP error model
fn transport_app_error(err: &TransportError) -> AppError {
    let code = match err {
        TransportError::NotConfigured(_) => ErrorCode::TransportNotConfigured,
        TransportError::Rejected { .. } | TransportError::InvalidRecipient(_) => {
            ErrorCode::TransportRejected
        }
        TransportError::Timeout(_) => ErrorCode::TimeoutError,
        TransportError::Http(_) => ErrorCode::NetworkError,
    };
    AppError::with_message(code, err.to_string())
}
