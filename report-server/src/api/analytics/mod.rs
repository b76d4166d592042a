//! Analytics API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/analytics", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/kpis", get(handler::get_kpis))
        .route("/trends", get(handler::get_trends))
        .route("/insights", get(handler::get_insights))
        .route("/forecast", get(handler::get_forecast))
        .route("/locations", get(handler::get_locations))
        .route("/snapshots", post(handler::create_snapshot))
}
