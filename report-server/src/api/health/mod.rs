//! Health Check API

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

/// GET /api/health
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "report-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
