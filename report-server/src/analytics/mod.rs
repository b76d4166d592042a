//! Analytics Engine
//!
//! Derives KPIs, trends, insights, forecasts and location rankings from
//! raw sales records on every call; nothing derived is cached or read
//! back. Read paths degrade to empty values on store failure so one bad
//! query never takes a dashboard down; the snapshot write path propagates
//! errors instead.

pub mod forecast;
pub mod insights;
pub mod metrics;

pub use insights::evaluate_insights;
pub use metrics::{compute_metrics, linear_trend, percentage_change, volatility};

use std::collections::BTreeMap;
use std::sync::Arc;

use shared::models::{
    AnalyticsSnapshot, ForecastPoint, KpiMetrics, LocationPerformance, PerformanceInsight,
    PeriodComparison, SalesRecord, TrendPoint,
};
use shared::{AppError, AppResult, DateRange};

use crate::db::SalesStore;

/// Default forecast horizon in days
pub const DEFAULT_FORECAST_DAYS: u32 = 7;

/// Months of extra history pulled in front of a forecast range
const FORECAST_HISTORY_MONTHS: u32 = 3;

/// `"all"` means no team filter, same as absent
fn normalize_team(team_id: Option<&str>) -> Option<&str> {
    team_id.filter(|t| *t != "all")
}

pub struct AnalyticsService {
    store: Arc<dyn SalesStore>,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn SalesStore>) -> Self {
        Self { store }
    }

    /// KPIs for the range with the comparison against the preceding,
    /// equal-length period. Degrades to all-zero metrics on store failure.
    pub async fn kpi_metrics(&self, range: &DateRange, team_id: Option<&str>) -> KpiMetrics {
        match self.kpi_metrics_inner(range, normalize_team(team_id)).await {
            Ok(metrics) => metrics,
            Err(e) => {
                tracing::error!(error = %e, "KPI metrics query failed, returning empty metrics");
                KpiMetrics::default()
            }
        }
    }

    async fn kpi_metrics_inner(
        &self,
        range: &DateRange,
        team_id: Option<&str>,
    ) -> AppResult<KpiMetrics> {
        let current_records = self.store.fetch_range(range, team_id).await?;
        let previous_records = self
            .store
            .fetch_range(&range.previous_period(), team_id)
            .await?;

        let current = compute_metrics(&current_records);
        let previous = compute_metrics(&previous_records);

        let comparison = PeriodComparison {
            gross_sales_change: percentage_change(previous.gross_sales, current.gross_sales),
            net_sales_change: percentage_change(previous.net_sales, current.net_sales),
            order_count_change: percentage_change(
                previous.order_count as f64,
                current.order_count as f64,
            ),
            average_order_value_change: percentage_change(
                previous.average_order_value,
                current.average_order_value,
            ),
        };

        Ok(current.with_comparison(comparison))
    }

    /// Daily KPI series over the range, ascending by date. Degrades to an
    /// empty series on store failure.
    pub async fn trend_data(&self, range: &DateRange, team_id: Option<&str>) -> Vec<TrendPoint> {
        match self.trend_data_inner(range, normalize_team(team_id)).await {
            Ok(trend) => trend,
            Err(e) => {
                tracing::error!(error = %e, "Trend query failed, returning empty series");
                Vec::new()
            }
        }
    }

    async fn trend_data_inner(
        &self,
        range: &DateRange,
        team_id: Option<&str>,
    ) -> AppResult<Vec<TrendPoint>> {
        let records = self.store.fetch_range(range, team_id).await?;

        let mut daily: BTreeMap<chrono::NaiveDate, Vec<SalesRecord>> = BTreeMap::new();
        for record in records {
            daily.entry(record.date).or_default().push(record);
        }

        Ok(daily
            .into_iter()
            .map(|(date, day_records)| {
                let kpis = compute_metrics(&day_records);
                TrendPoint {
                    date,
                    gross_sales: kpis.gross_sales,
                    net_sales: kpis.net_sales,
                    order_count: kpis.order_count,
                    average_order_value: kpis.average_order_value,
                }
            })
            .collect())
    }

    /// Rule-based insights for the range. Degrades to no insights on
    /// store failure.
    pub async fn performance_insights(
        &self,
        range: &DateRange,
        team_id: Option<&str>,
    ) -> Vec<PerformanceInsight> {
        let team_id = normalize_team(team_id);
        match self.performance_insights_inner(range, team_id).await {
            Ok(insights) => insights,
            Err(e) => {
                tracing::error!(error = %e, "Insight evaluation failed, returning none");
                Vec::new()
            }
        }
    }

    async fn performance_insights_inner(
        &self,
        range: &DateRange,
        team_id: Option<&str>,
    ) -> AppResult<Vec<PerformanceInsight>> {
        let kpis = self.kpi_metrics_inner(range, team_id).await?;
        let trend = self.trend_data_inner(range, team_id).await?;
        Ok(evaluate_insights(&kpis, &trend))
    }

    /// Straight-line forecast past the end of the range, fitted over the
    /// range widened backwards by three months. Degrades to an empty
    /// forecast on store failure or short history.
    pub async fn forecast(
        &self,
        range: &DateRange,
        team_id: Option<&str>,
        days: u32,
    ) -> Vec<ForecastPoint> {
        let widened = range.with_history(FORECAST_HISTORY_MONTHS);
        match self
            .trend_data_inner(&widened, normalize_team(team_id))
            .await
        {
            Ok(history) => forecast::project(&history, days),
            Err(e) => {
                tracing::error!(error = %e, "Forecast history query failed, returning empty forecast");
                Vec::new()
            }
        }
    }

    /// Per-location/team aggregates ranked by gross sales, highest first.
    /// Always covers every team; no team filter applies here. Degrades to
    /// an empty list on store failure.
    pub async fn location_performance(&self, range: &DateRange) -> Vec<LocationPerformance> {
        match self.location_performance_inner(range).await {
            Ok(performance) => performance,
            Err(e) => {
                tracing::error!(error = %e, "Location performance query failed, returning empty list");
                Vec::new()
            }
        }
    }

    async fn location_performance_inner(
        &self,
        range: &DateRange,
    ) -> AppResult<Vec<LocationPerformance>> {
        let records = self.store.fetch_range(range, None).await?;

        // Group by (location, team), preserving first-seen order so the
        // later sort keeps ties stable
        let mut groups: Vec<((String, String), Vec<SalesRecord>)> = Vec::new();
        for record in records {
            let key = (
                record.location.clone(),
                record
                    .team_id
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string()),
            );
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, group)) => group.push(record),
                None => groups.push((key, vec![record])),
            }
        }

        let mut performance: Vec<LocationPerformance> = groups
            .into_iter()
            .map(|((location, team_id), group)| {
                let kpis = compute_metrics(&group);
                let distinct_days = group
                    .iter()
                    .map(|r| r.date)
                    .collect::<std::collections::BTreeSet<_>>()
                    .len();
                let efficiency = if distinct_days > 0 {
                    kpis.order_count as f64 / distinct_days as f64
                } else {
                    0.0
                };
                LocationPerformance {
                    location,
                    team_id,
                    gross_sales: kpis.gross_sales,
                    net_sales: kpis.net_sales,
                    order_count: kpis.order_count,
                    average_order_value: kpis.average_order_value,
                    efficiency,
                    ranking: 0,
                }
            })
            .collect();

        performance.sort_by(|a, b| {
            b.gross_sales
                .partial_cmp(&a.gross_sales)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for (index, entry) in performance.iter_mut().enumerate() {
            entry.ranking = index as u32 + 1;
        }

        Ok(performance)
    }

    /// Compute KPIs and insights for the range and persist them as one
    /// snapshot tagged with the caller's organization. Unlike the read
    /// paths, failures here propagate.
    pub async fn create_snapshot(
        &self,
        range: &DateRange,
        team_id: Option<&str>,
    ) -> AppResult<()> {
        let kpis = self.kpi_metrics(range, team_id).await;
        let insights = self.performance_insights(range, team_id).await;

        let organization_id = self
            .store
            .current_organization()
            .await?
            .ok_or_else(AppError::organization_not_found)?;

        let snapshot =
            AnalyticsSnapshot::kpi_metrics(range.slug(), organization_id, &kpis, &insights);
        self.store.write_snapshot(snapshot).await
    }
}
