//! Shared types for the sales analytics pipeline
//!
//! This crate holds everything both the server and its tests agree on:
//!
//! - **Models** (`models`): sales records, KPI aggregates, insights,
//!   forecasts, weekly rollups, analytics snapshots
//! - **Errors** (`error`): unified error codes, [`AppError`] and the
//!   [`ApiResponse`] envelope
//! - **Types** (`types`): the inclusive [`DateRange`] used by every query

pub mod error;
pub mod models;
pub mod types;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use types::{DateRange, parse_date};
