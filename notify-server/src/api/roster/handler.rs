//! Roster upload handler

use axum::extract::{Multipart, State};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::UploadSummary;

use crate::core::{ServerState, ServiceResult};
use crate::roster::RosterStore;

/// POST /upload-excel
///
/// Replaces the whole roster and clears the sent log. Rejected while a
/// dispatch is running; unparsable files surface as a generic 500.
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> ServiceResult<ApiResponse<UploadSummary>> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {}", e)))?
    {
        if field.name() == Some("file") {
            file_name = field.file_name().map(str::to_string);
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?
                    .to_vec(),
            );
            break;
        }
    }

    let data = file_data.ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))?;
    if data.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile).into());
    }

    let _reserved = state.engine.try_reserve()?;

    tracing::info!(
        file = file_name.as_deref().unwrap_or("<unnamed>"),
        bytes = data.len(),
        "Roster upload received"
    );
    let members = tokio::task::spawn_blocking(move || RosterStore::load_bytes(&data)).await??;

    let loaded = state.roster.replace(members);
    state.audit.clear();
    state.roster.log_preview(3);

    let summary = UploadSummary {
        loaded,
        with_phone: state.roster.with_phone_count(),
    };
    tracing::info!(loaded = summary.loaded, with_phone = summary.with_phone, "Roster replaced");
    Ok(ApiResponse::success_with_message(
        format!("Loaded {} members", summary.loaded),
        summary,
    ))
}
