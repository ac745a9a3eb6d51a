//! Template routes
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /template | GET | current password and birthday templates |
//! | /update-template | POST | replace one template after placeholder checks |

use axum::{
    Router,
    body::Bytes,
    extract::State,
    routing::{get, post},
};
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{TemplateSet, TemplateUpdate};

use crate::api::json_body;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/template", get(current))
        .route("/update-template", post(update))
}

async fn current(State(state): State<ServerState>) -> ApiResponse<TemplateSet> {
    ApiResponse::success(state.templates.current())
}

async fn update(
    State(state): State<ServerState>,
    body: Bytes,
) -> AppResult<ApiResponse<TemplateSet>> {
    let req: TemplateUpdate = json_body(&body)?;
    let template = req.template.ok_or_else(|| AppError::required("template"))?;

    state.templates.update(req.kind, &template)?;
    Ok(ApiResponse::success_with_message(
        "Template updated",
        state.templates.current(),
    ))
}
