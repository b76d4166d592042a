//! Export Download API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/exports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/sales", get(handler::export_sales))
        .route("/weekly", get(handler::export_weekly))
        .route("/analytics", get(handler::export_analytics))
}
