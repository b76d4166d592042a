//! API Route Modules
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`analytics`] - KPI, trend, insight, forecast and snapshot endpoints
//! - [`exports`] - file download endpoints
//! - [`reports`] - template catalog, generation and preview endpoints

pub mod analytics;
pub mod exports;
pub mod health;
pub mod reports;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppError, AppResult};
