//! Unified error codes for the roster notifier
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Roster errors
//! - 2xxx: Template errors
//! - 3xxx: Dispatch errors
//! - 4xxx: Transport errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the frontend can switch
/// on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Roster ====================
    /// Member not found
    MemberNotFound = 1001,
    /// Member has no usable phone number
    MemberUnreachable = 1002,
    /// Spreadsheet could not be parsed
    SpreadsheetInvalid = 1003,
    /// No file provided in upload
    NoFileProvided = 1004,
    /// Empty file provided
    EmptyFile = 1005,
    /// Roster cannot be replaced right now
    RosterLocked = 1006,

    // ==================== 2xxx: Template ====================
    /// Template is missing a required placeholder
    TemplateMissingPlaceholder = 2001,
    /// Template is empty
    TemplateEmpty = 2002,

    // ==================== 3xxx: Dispatch ====================
    /// Requested range contains no members
    NothingToProcess = 3001,
    /// Another dispatch is already running
    DispatchInProgress = 3002,
    /// No phone numbers supplied
    NoNumbersProvided = 3003,

    // ==================== 4xxx: Transport ====================
    /// SMS provider rejected the message
    TransportRejected = 4001,
    /// SMS transport is not configured
    TransportNotConfigured = 4002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Roster
            ErrorCode::MemberNotFound => "Member not found",
            ErrorCode::MemberUnreachable => "Member has no phone number",
            ErrorCode::SpreadsheetInvalid => "Spreadsheet could not be parsed",
            ErrorCode::NoFileProvided => "No file provided",
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::RosterLocked => "Roster cannot be replaced while a dispatch is running",

            // Template
            ErrorCode::TemplateMissingPlaceholder => "Template is missing a required placeholder",
            ErrorCode::TemplateEmpty => "Template must not be empty",

            // Dispatch
            ErrorCode::NothingToProcess => "Nothing to process",
            ErrorCode::DispatchInProgress => "Another dispatch is already running",
            ErrorCode::NoNumbersProvided => "No phone numbers provided",

            // Transport
            ErrorCode::TransportRejected => "SMS provider rejected the message",
            ErrorCode::TransportNotConfigured => "SMS transport is not configured",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Roster
            1001 => Ok(ErrorCode::MemberNotFound),
            1002 => Ok(ErrorCode::MemberUnreachable),
            1003 => Ok(ErrorCode::SpreadsheetInvalid),
            1004 => Ok(ErrorCode::NoFileProvided),
            1005 => Ok(ErrorCode::EmptyFile),
            1006 => Ok(ErrorCode::RosterLocked),

            // Template
            2001 => Ok(ErrorCode::TemplateMissingPlaceholder),
            2002 => Ok(ErrorCode::TemplateEmpty),

            // Dispatch
            3001 => Ok(ErrorCode::NothingToProcess),
            3002 => Ok(ErrorCode::DispatchInProgress),
            3003 => Ok(ErrorCode::NoNumbersProvided),

            // Transport
            4001 => Ok(ErrorCode::TransportRejected),
            4002 => Ok(ErrorCode::TransportNotConfigured),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
