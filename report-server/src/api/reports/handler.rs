//! Report API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use shared::DateRange;
use shared::models::{ReportPreview, ReportTemplate};

use crate::core::ServerState;
use crate::export::ExportFormat;
use crate::reports::{ReportOptions, ReportService};
use crate::utils::AppResult;

/// Overrides accepted by both generate and preview
#[derive(Debug, Default, Deserialize)]
pub struct ReportRequest {
    pub format: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub team_id: Option<String>,
    pub include_insights: Option<bool>,
}

impl ReportRequest {
    fn into_options(self) -> AppResult<ReportOptions> {
        let format = self
            .format
            .as_deref()
            .map(str::parse::<ExportFormat>)
            .transpose()?;
        let date_range = match (self.start.as_deref(), self.end.as_deref()) {
            (Some(start), Some(end)) => Some(DateRange::parse(start, end)?),
            _ => None,
        };
        Ok(ReportOptions {
            format,
            date_range,
            team_id: self.team_id,
            include_insights: self.include_insights,
        })
    }
}

/// GET /api/reports/templates
pub async fn list_templates() -> Json<Vec<ReportTemplate>> {
    Json(ReportService::templates())
}

/// POST /api/reports/:id/generate
pub async fn generate(
    State(state): State<ServerState>,
    Path(id): Path<u32>,
    Query(query): Query<ReportRequest>,
    body: Option<Json<ReportRequest>>,
) -> AppResult<Response> {
    let template = ReportService::template(id)?;
    let request = body.map(|Json(b)| b).unwrap_or(query);
    let options = request.into_options()?;

    let service = ReportService::new(state.store.clone());
    let report = service
        .generate(template.kind, &options, Utc::now().date_naive())
        .await?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                report.export.content_type.to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", report.filename),
            ),
        ],
        report.export.bytes,
    )
        .into_response())
}

/// POST /api/reports/:id/preview
pub async fn preview(
    State(state): State<ServerState>,
    Path(id): Path<u32>,
    body: Option<Json<ReportRequest>>,
) -> AppResult<Json<ReportPreview>> {
    let template = ReportService::template(id)?;
    let options = body.map(|Json(b)| b).unwrap_or_default().into_options()?;

    let service = ReportService::new(state.store.clone());
    Ok(Json(
        service
            .preview(template.kind, &options, Utc::now().date_naive())
            .await,
    ))
}
