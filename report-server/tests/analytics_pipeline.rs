//! End-to-end pipeline tests over the in-memory sales store
//!
//! Seeds two adjacent periods of daily records and checks the derived
//! KPIs, insights, forecast and snapshot writes against hand-computed
//! values.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use report_server::analytics::AnalyticsService;
use report_server::db::{MemorySalesStore, SalesStore};
use shared::models::{AnalyticsSnapshot, SalesRecord};
use shared::{AppError, AppResult, DateRange};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn record(date: &str, location: &str, team: &str, gross: f64, orders: i64) -> SalesRecord {
    let json = format!(
        r#"{{
            "date": "{date}",
            "location": "{location}",
            "team_id": "{team}",
            "grossSales": {gross},
            "netSales": {net},
            "orderCount": {orders},
            "orderAverage": 0,
            "labor": {{"cost": {labor}}},
            "paymentBreakdown": {{"tips": 10.0}}
        }}"#,
        net = gross * 0.9,
        labor = gross * 0.25,
    );
    serde_json::from_str(&json).unwrap()
}

/// Jan 8-14 doubles Jan 1-7 day for day
fn seeded_store() -> Arc<MemorySalesStore> {
    let mut records = Vec::new();
    for day in 1..=7 {
        records.push(record(
            &format!("2024-01-{:02}", day),
            "Store A",
            "team-1",
            1000.0,
            50,
        ));
    }
    for day in 8..=14 {
        records.push(record(
            &format!("2024-01-{:02}", day),
            "Store A",
            "team-1",
            2000.0,
            80,
        ));
    }
    Arc::new(MemorySalesStore::seeded(Some("org-1".into()), records))
}

fn current_week() -> DateRange {
    DateRange::parse("2024-01-08", "2024-01-14").unwrap()
}

#[tokio::test]
async fn kpis_compare_against_previous_period() {
    let analytics = AnalyticsService::new(seeded_store());
    let kpis = analytics.kpi_metrics(&current_week(), None).await;

    assert_eq!(kpis.gross_sales, 14000.0);
    assert_eq!(kpis.order_count, 560);
    assert_eq!(kpis.labor_cost_percentage, 25.0);
    // 12600 net over 560 orders
    assert_eq!(kpis.average_order_value, 22.5);
    // Previous week had 7000 gross and 350 orders
    assert_eq!(kpis.period_comparison.gross_sales_change, 100.0);
    assert!((kpis.period_comparison.order_count_change - 60.0).abs() < 1e-9);
}

#[tokio::test]
async fn kpis_with_empty_previous_period_report_full_growth() {
    let analytics = AnalyticsService::new(seeded_store());
    let first_week = DateRange::parse("2024-01-01", "2024-01-07").unwrap();
    let kpis = analytics.kpi_metrics(&first_week, None).await;

    assert_eq!(kpis.gross_sales, 7000.0);
    assert_eq!(kpis.period_comparison.gross_sales_change, 100.0);
}

#[tokio::test]
async fn team_filter_all_is_a_no_op() {
    let analytics = AnalyticsService::new(seeded_store());
    let filtered = analytics.kpi_metrics(&current_week(), Some("all")).await;
    let unfiltered = analytics.kpi_metrics(&current_week(), None).await;
    assert_eq!(filtered, unfiltered);

    let missing_team = analytics
        .kpi_metrics(&current_week(), Some("team-9"))
        .await;
    assert_eq!(missing_team.gross_sales, 0.0);
}

#[tokio::test]
async fn trend_has_one_point_per_day() {
    let analytics = AnalyticsService::new(seeded_store());
    let trend = analytics.trend_data(&current_week(), None).await;

    assert_eq!(trend.len(), 7);
    assert_eq!(trend[0].date, d("2024-01-08"));
    assert!(trend.windows(2).all(|w| w[0].date < w[1].date));
    assert_eq!(trend[0].gross_sales, 2000.0);
}

#[tokio::test]
async fn doubling_revenue_fires_the_growth_insight() {
    let analytics = AnalyticsService::new(seeded_store());
    let insights = analytics.performance_insights(&current_week(), None).await;

    let ids: Vec<&str> = insights.iter().map(|i| i.id.as_str()).collect();
    assert!(ids.contains(&"revenue-growth"));
    assert!(!ids.contains(&"revenue-decline"));
}

#[tokio::test]
async fn forecast_needs_fourteen_days_of_history() {
    let analytics = AnalyticsService::new(seeded_store());

    // History is widened three months back, so all 14 seeded days count
    let forecast = analytics.forecast(&current_week(), None, 7).await;
    assert_eq!(forecast.len(), 7);
    assert_eq!(forecast[0].date, d("2024-01-15"));
    assert!(forecast.iter().all(|p| p.predicted >= 0.0));
    assert!((forecast[0].confidence - 0.9).abs() < 1e-9);

    // A store with a single day cannot support a forecast
    let sparse = Arc::new(MemorySalesStore::seeded(
        None,
        vec![record("2024-01-08", "Store A", "team-1", 100.0, 5)],
    ));
    let empty = AnalyticsService::new(sparse)
        .forecast(&current_week(), None, 7)
        .await;
    assert!(empty.is_empty());
}

#[tokio::test]
async fn locations_rank_by_gross_sales() {
    let store = Arc::new(MemorySalesStore::seeded(
        None,
        vec![
            record("2024-01-08", "Store A", "team-1", 250.0, 20),
            record("2024-01-09", "Store A", "team-1", 250.0, 30),
            record("2024-01-08", "Store B", "team-2", 1500.0, 60),
            record("2024-01-08", "Store C", "team-3", 1000.0, 40),
        ],
    ));
    let analytics = AnalyticsService::new(store);
    let locations = analytics.location_performance(&current_week()).await;

    assert_eq!(locations.len(), 3);
    let order: Vec<&str> = locations.iter().map(|l| l.location.as_str()).collect();
    assert_eq!(order, vec!["Store B", "Store C", "Store A"]);
    assert_eq!(
        locations.iter().map(|l| l.ranking).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(locations[0].efficiency, 60.0);
    // Store A: 50 orders over 2 distinct trading days
    assert_eq!(locations[2].efficiency, 25.0);
}

#[tokio::test]
async fn snapshot_write_captures_kpis_and_insights() {
    let store = seeded_store();
    let analytics = AnalyticsService::new(store.clone());
    analytics
        .create_snapshot(&current_week(), None)
        .await
        .unwrap();

    let snapshots = store.snapshots();
    assert_eq!(snapshots.len(), 1);
    let snapshot = &snapshots[0];
    assert_eq!(snapshot.snapshot_type, "kpi_metrics");
    assert_eq!(snapshot.time_period, "2024-01-08_to_2024-01-14");
    assert_eq!(snapshot.organization_id, "org-1");
    assert_eq!(snapshot.metrics_data["kpiMetrics"]["grossSales"], 14000.0);
    let insight_ids: Vec<&str> = snapshot.metrics_data["insights"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|i| i["id"].as_str())
        .collect();
    assert!(insight_ids.contains(&"revenue-growth"));
}

#[tokio::test]
async fn snapshot_without_organization_fails() {
    let store = Arc::new(MemorySalesStore::new(None));
    let analytics = AnalyticsService::new(store);
    let err = analytics
        .create_snapshot(&current_week(), None)
        .await
        .unwrap_err();
    assert_eq!(err.code, shared::ErrorCode::OrganizationNotFound);
}

/// Store whose reads always fail, for checking the degrade policy
struct FailingStore;

#[async_trait]
impl SalesStore for FailingStore {
    async fn fetch_range(
        &self,
        _range: &DateRange,
        _team_id: Option<&str>,
    ) -> AppResult<Vec<SalesRecord>> {
        Err(AppError::database("connection reset"))
    }

    async fn current_organization(&self) -> AppResult<Option<String>> {
        Err(AppError::database("connection reset"))
    }

    async fn write_snapshot(&self, _snapshot: AnalyticsSnapshot) -> AppResult<()> {
        Err(AppError::database("connection reset"))
    }
}

#[tokio::test]
async fn read_paths_degrade_on_store_failure() {
    let analytics = AnalyticsService::new(Arc::new(FailingStore));
    let range = current_week();

    assert_eq!(
        analytics.kpi_metrics(&range, None).await,
        Default::default()
    );
    assert!(analytics.trend_data(&range, None).await.is_empty());
    assert!(analytics.performance_insights(&range, None).await.is_empty());
    assert!(analytics.forecast(&range, None, 7).await.is_empty());
    assert!(analytics.location_performance(&range).await.is_empty());
}

#[tokio::test]
async fn snapshot_write_path_propagates_store_failure() {
    let analytics = AnalyticsService::new(Arc::new(FailingStore));
    let err = analytics
        .create_snapshot(&current_week(), None)
        .await
        .unwrap_err();
    assert_eq!(err.code, shared::ErrorCode::DatabaseError);
}
