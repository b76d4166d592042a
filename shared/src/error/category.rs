//! Error categories for grouping error codes by domain

use serde::{Deserialize, Serialize};
use std::fmt;

/// High-level classification of an [`ErrorCode`](super::ErrorCode)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Validation, not-found, bad-request style errors (0xxx)
    General,
    /// Report generation and template errors (4xxx)
    Report,
    /// Export encoding errors (5xxx)
    Export,
    /// Database and internal errors (9xxx)
    System,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCategory::General => "general",
            ErrorCategory::Report => "report",
            ErrorCategory::Export => "export",
            ErrorCategory::System => "system",
        };
        write!(f, "{}", s)
    }
}
