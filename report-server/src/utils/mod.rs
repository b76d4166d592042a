//! Utility modules

pub mod logger;
pub mod time;

// Re-export common types for handlers
pub use shared::error::{ApiResponse, AppError, AppResult};
