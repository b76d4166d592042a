//! Unified error codes for the analytics pipeline
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Report errors
//! - 5xxx: Export errors
//! - 9xxx: System errors

use super::category::ErrorCategory;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript dashboards, etc.)
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
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 4xxx: Report ====================
    /// Report template id does not exist
    UnknownReportTemplate = 4001,
    /// Organization could not be resolved for the snapshot write
    OrganizationNotFound = 4002,

    // ==================== 5xxx: Export ====================
    /// Export format is not supported for the requested payload
    UnsupportedFormat = 5001,
    /// Custom export field is not in the closed field mapping
    UnknownExportField = 5002,
    /// Encoder failed to produce output bytes
    EncodingFailed = 5003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Numeric value of this error code
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Category this error code belongs to
    pub fn category(&self) -> ErrorCategory {
        match self.code() {
            0..=999 => ErrorCategory::General,
            4000..=4999 => ErrorCategory::Report,
            5000..=5999 => ErrorCategory::Export,
            _ => ErrorCategory::System,
        }
    }

    /// Default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Success",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::UnknownReportTemplate => "Unknown report template",
            ErrorCode::OrganizationNotFound => "Organization not found",
            ErrorCode::UnsupportedFormat => "Unsupported export format",
            ErrorCode::UnknownExportField => "Unknown export field",
            ErrorCode::EncodingFailed => "Export encoding failed",
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }

    /// HTTP status code this error maps to
    pub fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::Success => StatusCode::OK,
            ErrorCode::ValidationFailed
            | ErrorCode::InvalidRequest
            | ErrorCode::InvalidFormat
            | ErrorCode::UnsupportedFormat
            | ErrorCode::UnknownExportField => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound | ErrorCode::UnknownReportTemplate => StatusCode::NOT_FOUND,
            ErrorCode::AlreadyExists => StatusCode::CONFLICT,
            ErrorCode::OrganizationNotFound => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::Unknown
            | ErrorCode::EncodingFailed
            | ErrorCode::InternalError
            | ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unrecognized u16 to an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::AlreadyExists,
            5 => ErrorCode::InvalidRequest,
            6 => ErrorCode::InvalidFormat,
            4001 => ErrorCode::UnknownReportTemplate,
            4002 => ErrorCode::OrganizationNotFound,
            5001 => ErrorCode::UnsupportedFormat,
            5002 => ErrorCode::UnknownExportField,
            5003 => ErrorCode::EncodingFailed,
            9001 => ErrorCode::InternalError,
            9002 => ErrorCode::DatabaseError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}
