//! Export API Handlers
//!
//! Each endpoint encodes on the fly and answers with an attachment
//! download. Unlike the analytics reads, store failures here surface as
//! error responses.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use shared::models::{WeeklySales, WeeklyTotals};
use shared::{DateRange, parse_date};

use crate::analytics::AnalyticsService;
use crate::core::ServerState;
use crate::export::{
    CustomField, EncodedExport, ExportFormat, ExportOptions, export_analytics_report,
    export_sales_data, export_weekly_report, generate_filename,
};
use crate::utils::{AppResult, time};

#[derive(Debug, Deserialize)]
pub struct SalesExportQuery {
    pub format: String,
    pub start: String,
    pub end: String,
    pub team_id: Option<String>,
    #[serde(default)]
    pub include_raw_data: bool,
    /// Comma-separated custom column names
    pub custom_fields: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WeeklyExportQuery {
    pub format: String,
    /// Any day inside the target week
    pub start: String,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsExportQuery {
    pub format: String,
    pub start: String,
    pub end: String,
    pub team_id: Option<String>,
    #[serde(default = "default_true")]
    pub include_insights: bool,
}

fn default_true() -> bool {
    true
}

fn attachment(export: EncodedExport, filename: String) -> Response {
    if let Some(note) = &export.note {
        tracing::warn!(%filename, note, "Serving degraded export");
    }
    (
        [
            (header::CONTENT_TYPE, export.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        export.bytes,
    )
        .into_response()
}

/// GET /api/exports/sales
pub async fn export_sales(
    State(state): State<ServerState>,
    Query(query): Query<SalesExportQuery>,
) -> AppResult<Response> {
    let format: ExportFormat = query.format.parse()?;
    let range = DateRange::parse(&query.start, &query.end)?;
    let custom_fields = query
        .custom_fields
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .filter(|s| !s.is_empty())
        .map(CustomField::parse)
        .collect::<AppResult<Vec<_>>>()?;

    let team_id = query.team_id.as_deref().filter(|t| *t != "all");
    let records = state.store.fetch_range(&range, team_id).await?;

    let options = ExportOptions {
        format,
        include_raw_data: query.include_raw_data,
        date_range: Some(range),
        team_id: query.team_id.clone(),
        custom_fields,
        ..Default::default()
    };
    let export = export_sales_data(&records, &options)?;
    Ok(attachment(
        export,
        generate_filename("sales-data", format, Some(&range)),
    ))
}

/// GET /api/exports/weekly
pub async fn export_weekly(
    State(state): State<ServerState>,
    Query(query): Query<WeeklyExportQuery>,
) -> AppResult<Response> {
    let format: ExportFormat = query.format.parse()?;
    let week = time::week_of(parse_date(&query.start)?);

    let records = state.store.fetch_range(&week, None).await?;
    let weekly = rollup_week(query.location.as_deref(), &week, records);

    let options = ExportOptions {
        format,
        date_range: Some(week),
        ..Default::default()
    };
    let export = export_weekly_report(&weekly, &options)?;
    Ok(attachment(
        export,
        generate_filename("weekly-report", format, Some(&week)),
    ))
}

/// GET /api/exports/analytics
pub async fn export_analytics(
    State(state): State<ServerState>,
    Query(query): Query<AnalyticsExportQuery>,
) -> AppResult<Response> {
    let format: ExportFormat = query.format.parse()?;
    let range = DateRange::parse(&query.start, &query.end)?;

    let analytics = AnalyticsService::new(state.store.clone());
    let kpis = analytics.kpi_metrics(&range, query.team_id.as_deref()).await;
    let insights = analytics
        .performance_insights(&range, query.team_id.as_deref())
        .await;

    let options = ExportOptions {
        format,
        include_insights: query.include_insights,
        date_range: Some(range),
        team_id: query.team_id.clone(),
        ..Default::default()
    };
    let export = export_analytics_report(&kpis, &insights, &options)?;
    Ok(attachment(
        export,
        generate_filename("analytics-report", format, Some(&range)),
    ))
}

/// Fold one week of records into the weekly rollup shape
pub fn rollup_week(
    location: Option<&str>,
    week: &DateRange,
    records: Vec<shared::models::SalesRecord>,
) -> WeeklySales {
    let daily_sales: Vec<_> = records
        .into_iter()
        .filter(|r| location.is_none_or(|l| r.location == l))
        .collect();

    let totals = WeeklyTotals {
        gross_total: daily_sales.iter().map(|s| s.gross_sales).sum(),
        net_sales: daily_sales.iter().map(|s| s.net_sales).sum(),
        non_cash: daily_sales.iter().map(|s| s.payment_breakdown.non_cash).sum(),
        total_cash: daily_sales
            .iter()
            .map(|s| s.payment_breakdown.total_cash)
            .sum(),
        tips: daily_sales.iter().map(|s| s.payment_breakdown.tips).sum(),
        discount: daily_sales
            .iter()
            .flat_map(|s| &s.discounts)
            .map(|d| d.total)
            .sum(),
        tax_paid: daily_sales
            .iter()
            .flat_map(|s| &s.taxes)
            .map(|t| t.total)
            .sum(),
    };

    WeeklySales {
        location: location.unwrap_or("All Locations").to_string(),
        week_start: week.start,
        week_end: week.end,
        daily_sales,
        totals,
    }
}
