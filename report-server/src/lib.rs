//! Report Server
//!
//! Sales analytics and reporting pipeline: aggregates per-day sales
//! records into KPIs, trends, insights and forecasts, and serves
//! CSV/PDF/JSON exports and canned reports over HTTP.
//!
//! # Modules
//!
//! - [`core`] - configuration, shared state and the HTTP server
//! - [`db`] - the sales data store seam and its implementations
//! - [`analytics`] - metrics, insights, forecast and location ranking
//! - [`export`] - format encoders and export dispatch
//! - [`reports`] - the canned report catalog
//! - [`api`] - HTTP routing and handlers
//! - [`utils`] - logging and calendar helpers

pub mod analytics;
pub mod api;
pub mod core;
pub mod db;
pub mod export;
pub mod reports;
pub mod utils;

pub use crate::core::{Config, Server, ServerState};
pub use shared::{AppError, AppResult};

/// Load the `.env` file and initialize logging
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}
