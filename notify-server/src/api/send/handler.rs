//! Send handlers

use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Query, State},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{
    BirthdaySummary, BulkSendRequest, DispatchSummary, ManualSendRequest, ManualSendSummary,
    SendPasswordRequest, SendPasswordResponse,
};

use crate::api::json_body;
use crate::birthdays::today_in;
use crate::core::ServerState;
use crate::dispatch::DispatchOptions;

/// POST /send-password
pub async fn send_password(
    State(state): State<ServerState>,
    body: Bytes,
) -> AppResult<ApiResponse<SendPasswordResponse>> {
    let req: SendPasswordRequest = json_body(&body)?;
    let membership_id = req
        .membership_id()
        .ok_or_else(|| AppError::required("membership_id"))?;

    tracing::info!(membership_id = %membership_id, "Single send requested");
    let resp = state.engine.dispatch_one(&membership_id).await?;
    Ok(ApiResponse::success(resp))
}

/// POST /bulk-send
pub async fn bulk_send(
    State(state): State<ServerState>,
    body: Bytes,
) -> AppResult<ApiResponse<DispatchSummary>> {
    let req: BulkSendRequest = json_body(&body)?;
    let opts = DispatchOptions {
        batch_size: req.batch_size.unwrap_or(state.config.default_batch_size),
        delay: Duration::from_millis(req.delay_ms.unwrap_or(state.config.default_delay_ms)),
        start: req.start.unwrap_or(0),
        limit: req.limit,
    };

    let summary = state.engine.dispatch(opts).await?;
    Ok(ApiResponse::success_with_message(
        format!(
            "Bulk send finished: {} sent, {} failed",
            summary.successful, summary.failed
        ),
        summary,
    ))
}

/// POST /send-manual-numbers
pub async fn send_manual(
    State(state): State<ServerState>,
    body: Bytes,
) -> AppResult<ApiResponse<ManualSendSummary>> {
    let req: ManualSendRequest = json_body(&body)?;
    let summary = state
        .engine
        .dispatch_manual(&req.numbers, req.message.as_deref())
        .await?;
    Ok(ApiResponse::success(summary))
}

#[derive(Debug, Deserialize)]
pub struct BirthdayQuery {
    /// Override "today" (`YYYY-MM-DD`)
    pub date: Option<NaiveDate>,
}

/// POST /birthday-send
pub async fn birthday_send(
    State(state): State<ServerState>,
    Query(query): Query<BirthdayQuery>,
) -> AppResult<ApiResponse<BirthdaySummary>> {
    let today = query
        .date
        .unwrap_or_else(|| today_in(Utc::now(), state.config.timezone));
    let summary = state.engine.dispatch_birthdays(today).await?;
    Ok(ApiResponse::success(summary))
}
