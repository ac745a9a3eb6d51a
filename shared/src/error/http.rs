//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound | Self::MemberNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::DispatchInProgress | Self::RosterLocked => StatusCode::CONFLICT,

            // 422 Unprocessable Entity
            Self::MemberUnreachable => StatusCode::UNPROCESSABLE_ENTITY,

            // 502 Bad Gateway (upstream SMS provider)
            Self::TransportRejected => StatusCode::BAD_GATEWAY,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::NetworkError | Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::Unknown
            | Self::InternalError
            | Self::ConfigError
            | Self::TransportNotConfigured
            | Self::SpreadsheetInvalid => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
