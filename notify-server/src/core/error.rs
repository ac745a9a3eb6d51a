//! Service-layer error type
//!
//! `ServiceError` lets infrastructure failures (spreadsheet parsing, task joins,
//! I/O) propagate with `?` and reach the client as a generic 500, while
//! business errors pass through unchanged.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

use crate::roster::SpreadsheetError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug)]
pub enum ServiceError {
    /// Infrastructure error (auto-logged, mapped to InternalError)
    Internal(BoxError),
    /// Business-rule error (passed through to the client)
    App(AppError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<BoxError> for ServiceError {
    fn from(e: BoxError) -> Self {
        ServiceError::Internal(e)
    }
}

impl From<SpreadsheetError> for ServiceError {
    fn from(e: SpreadsheetError) -> Self {
        ServiceError::Internal(e.into())
    }
}

impl From<tokio::task::JoinError> for ServiceError {
    fn from(e: tokio::task::JoinError) -> Self {
        ServiceError::Internal(e.into())
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Internal(err) => {
                tracing::error!(error = %err, "Service error");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
