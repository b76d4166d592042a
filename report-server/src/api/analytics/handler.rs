//! Analytics API Handlers
//!
//! Read endpoints return the degraded-empty values straight from the
//! service; only malformed query parameters produce an error response.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::models::{
    ForecastPoint, KpiMetrics, LocationPerformance, PerformanceInsight, TrendPoint,
};
use shared::DateRange;

use crate::analytics::{AnalyticsService, DEFAULT_FORECAST_DAYS};
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: String,
    pub end: String,
    pub team_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub start: String,
    pub end: String,
    pub team_id: Option<String>,
    #[serde(default = "default_forecast_days")]
    pub days: u32,
}

fn default_forecast_days() -> u32 {
    DEFAULT_FORECAST_DAYS
}

#[derive(Debug, Deserialize)]
pub struct SnapshotRequest {
    pub start: String,
    pub end: String,
    pub team_id: Option<String>,
}

/// GET /api/analytics/kpis
pub async fn get_kpis(
    State(state): State<ServerState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<KpiMetrics>> {
    let range = DateRange::parse(&query.start, &query.end)?;
    let analytics = AnalyticsService::new(state.store.clone());
    Ok(Json(
        analytics.kpi_metrics(&range, query.team_id.as_deref()).await,
    ))
}

/// GET /api/analytics/trends
pub async fn get_trends(
    State(state): State<ServerState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<TrendPoint>>> {
    let range = DateRange::parse(&query.start, &query.end)?;
    let analytics = AnalyticsService::new(state.store.clone());
    Ok(Json(
        analytics.trend_data(&range, query.team_id.as_deref()).await,
    ))
}

/// GET /api/analytics/insights
pub async fn get_insights(
    State(state): State<ServerState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<PerformanceInsight>>> {
    let range = DateRange::parse(&query.start, &query.end)?;
    let analytics = AnalyticsService::new(state.store.clone());
    Ok(Json(
        analytics
            .performance_insights(&range, query.team_id.as_deref())
            .await,
    ))
}

/// GET /api/analytics/forecast
pub async fn get_forecast(
    State(state): State<ServerState>,
    Query(query): Query<ForecastQuery>,
) -> AppResult<Json<Vec<ForecastPoint>>> {
    let range = DateRange::parse(&query.start, &query.end)?;
    let analytics = AnalyticsService::new(state.store.clone());
    Ok(Json(
        analytics
            .forecast(&range, query.team_id.as_deref(), query.days)
            .await,
    ))
}

/// GET /api/analytics/locations
pub async fn get_locations(
    State(state): State<ServerState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<LocationPerformance>>> {
    let range = DateRange::parse(&query.start, &query.end)?;
    let analytics = AnalyticsService::new(state.store.clone());
    Ok(Json(analytics.location_performance(&range).await))
}

/// POST /api/analytics/snapshots
pub async fn create_snapshot(
    State(state): State<ServerState>,
    Json(payload): Json<SnapshotRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let range = DateRange::parse(&payload.start, &payload.end)?;
    let analytics = AnalyticsService::new(state.store.clone());
    analytics
        .create_snapshot(&range, payload.team_id.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok()))
}
