//! Report Catalog API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/templates", get(handler::list_templates))
        .route("/{id}/generate", post(handler::generate))
        .route("/{id}/preview", post(handler::preview))
}
