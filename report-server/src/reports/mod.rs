//! Canned Report Catalog
//!
//! Six fixed report templates, each with its own default period and
//! encoder routing. Generation is an export path, so errors propagate;
//! previews ride on the degrading analytics reads and always produce
//! something renderable.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use shared::models::{
    KeyMetric, KpiMetrics, ReportKind, ReportPreview, ReportTemplate, TrendDirection,
};
use shared::{AppError, AppResult, DateRange};

use crate::analytics::AnalyticsService;
use crate::db::SalesStore;
use crate::export::{
    EncodedExport, ExportFormat, ExportOptions, export_analytics_report, export_sales_data,
    generate_filename,
};
use crate::utils::time;

/// Caller-supplied overrides for one generation or preview
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportOptions {
    pub format: Option<ExportFormat>,
    pub date_range: Option<DateRange>,
    pub team_id: Option<String>,
    pub include_insights: Option<bool>,
}

/// Encoded report plus the filename it should download as
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub filename: String,
    pub export: EncodedExport,
}

pub struct ReportService {
    store: Arc<dyn SalesStore>,
    analytics: AnalyticsService,
}

impl ReportService {
    pub fn new(store: Arc<dyn SalesStore>) -> Self {
        Self {
            analytics: AnalyticsService::new(store.clone()),
            store,
        }
    }

    /// The fixed template catalog
    pub fn templates() -> Vec<ReportTemplate> {
        vec![
            ReportTemplate {
                id: 1,
                title: "Weekly Sales Summary".into(),
                description: "Complete overview of weekly sales performance with key metrics"
                    .into(),
                category: "sales".into(),
                kind: ReportKind::WeeklySalesSummary,
            },
            ReportTemplate {
                id: 2,
                title: "Monthly P&L Statement".into(),
                description: "Detailed profit and loss statement for monthly reporting".into(),
                category: "financial".into(),
                kind: ReportKind::MonthlyPnl,
            },
            ReportTemplate {
                id: 3,
                title: "Daily Sales Dashboard".into(),
                description: "Real-time daily sales metrics and performance indicators".into(),
                category: "analytics".into(),
                kind: ReportKind::DailySalesDashboard,
            },
            ReportTemplate {
                id: 4,
                title: "Sales Trends Analysis".into(),
                description: "Advanced analytics showing sales patterns and forecasts".into(),
                category: "analytics".into(),
                kind: ReportKind::SalesTrendsAnalysis,
            },
            ReportTemplate {
                id: 5,
                title: "Payment Methods Report".into(),
                description: "Breakdown of payment methods and transaction types".into(),
                category: "sales".into(),
                kind: ReportKind::PaymentMethods,
            },
            ReportTemplate {
                id: 6,
                title: "Tax Summary Report".into(),
                description: "Comprehensive tax information for compliance reporting".into(),
                category: "financial".into(),
                kind: ReportKind::TaxSummary,
            },
        ]
    }

    /// Look up one template by catalog id
    pub fn template(id: u32) -> AppResult<ReportTemplate> {
        Self::templates()
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::unknown_template(id))
    }

    /// Period used when the caller does not supply one
    fn default_range(kind: ReportKind, today: NaiveDate) -> DateRange {
        match kind {
            ReportKind::WeeklySalesSummary | ReportKind::PaymentMethods => {
                time::current_week(today)
            }
            ReportKind::MonthlyPnl | ReportKind::TaxSummary => time::current_month(today),
            ReportKind::DailySalesDashboard => time::yesterday(today),
            ReportKind::SalesTrendsAnalysis => time::trailing_days(today, 30),
        }
    }

    fn filename_stem(kind: ReportKind) -> &'static str {
        match kind {
            ReportKind::WeeklySalesSummary => "weekly-sales-summary",
            ReportKind::MonthlyPnl => "monthly-pnl",
            ReportKind::DailySalesDashboard => "daily-sales-dashboard",
            ReportKind::SalesTrendsAnalysis => "sales-trends-analysis",
            ReportKind::PaymentMethods => "payment-methods",
            ReportKind::TaxSummary => "tax-summary",
        }
    }

    /// Generate and encode one report
    pub async fn generate(
        &self,
        kind: ReportKind,
        options: &ReportOptions,
        today: NaiveDate,
    ) -> AppResult<GeneratedReport> {
        let range = options
            .date_range
            .unwrap_or_else(|| Self::default_range(kind, today));
        let format = options.format.unwrap_or(ExportFormat::Pdf);
        let export_options = ExportOptions {
            format,
            include_insights: options.include_insights.unwrap_or(true),
            include_raw_data: false,
            date_range: Some(range),
            team_id: options.team_id.clone(),
            custom_fields: Vec::new(),
        };

        let export = match kind {
            ReportKind::MonthlyPnl | ReportKind::SalesTrendsAnalysis => {
                let kpis = self
                    .analytics
                    .kpi_metrics(&range, options.team_id.as_deref())
                    .await;
                let insights = self
                    .analytics
                    .performance_insights(&range, options.team_id.as_deref())
                    .await;
                export_analytics_report(&kpis, &insights, &export_options)?
            }
            ReportKind::WeeklySalesSummary
            | ReportKind::DailySalesDashboard
            | ReportKind::PaymentMethods
            | ReportKind::TaxSummary => {
                let team_id = options.team_id.as_deref().filter(|t| *t != "all");
                let records = self.store.fetch_range(&range, team_id).await?;
                export_sales_data(&records, &export_options)?
            }
        };

        Ok(GeneratedReport {
            filename: generate_filename(Self::filename_stem(kind), format, Some(&range)),
            export,
        })
    }

    /// KPI-driven preview without running any encoder
    pub async fn preview(
        &self,
        kind: ReportKind,
        options: &ReportOptions,
        today: NaiveDate,
    ) -> ReportPreview {
        match kind {
            ReportKind::WeeklySalesSummary
            | ReportKind::SalesTrendsAnalysis
            | ReportKind::PaymentMethods => self.preview_weekly(options, today).await,
            ReportKind::MonthlyPnl | ReportKind::TaxSummary => {
                self.preview_monthly(options, today).await
            }
            ReportKind::DailySalesDashboard => Self::preview_daily(options, today),
        }
    }

    async fn preview_weekly(&self, options: &ReportOptions, today: NaiveDate) -> ReportPreview {
        let range = options
            .date_range
            .unwrap_or_else(|| time::current_week(today));
        let team_id = options.team_id.as_deref();
        let kpis = self.analytics.kpi_metrics(&range, team_id).await;
        let insights = self.analytics.performance_insights(&range, team_id).await;
        let comparison = &kpis.period_comparison;

        ReportPreview {
            title: format!(
                "Weekly Sales Summary - {} to {}",
                range.start.format("%b %d"),
                range.end.format("%b %d")
            ),
            summary: "Comprehensive weekly sales performance report including revenue breakdown, \
                      trend analysis, and location comparison."
                .into(),
            key_metrics: vec![
                KeyMetric {
                    label: "Gross Sales".into(),
                    value: format!("${:.2}", kpis.gross_sales),
                    change: Some(signed_percent(comparison.gross_sales_change)),
                    trend: Some(direction(comparison.gross_sales_change)),
                },
                KeyMetric {
                    label: "Order Count".into(),
                    value: kpis.order_count.to_string(),
                    change: Some(signed_percent(comparison.order_count_change)),
                    trend: Some(direction(comparison.order_count_change)),
                },
                KeyMetric {
                    label: "Average Order".into(),
                    value: format!("${:.2}", kpis.average_order_value),
                    change: Some(signed_percent(comparison.average_order_value_change)),
                    trend: Some(direction(comparison.average_order_value_change)),
                },
            ],
            insights: insights.into_iter().map(|i| i.title).collect(),
        }
    }

    async fn preview_monthly(&self, options: &ReportOptions, today: NaiveDate) -> ReportPreview {
        let range = options
            .date_range
            .unwrap_or_else(|| time::current_month(today));
        let kpis: KpiMetrics = self
            .analytics
            .kpi_metrics(&range, options.team_id.as_deref())
            .await;

        ReportPreview {
            title: format!(
                "Monthly P&L Statement - {}",
                range.start.format("%B %Y")
            ),
            summary: "Detailed profit and loss statement including income statement, expense \
                      tracking, and margin analysis."
                .into(),
            key_metrics: vec![
                KeyMetric {
                    label: "Net Sales".into(),
                    value: format!("${:.2}", kpis.net_sales),
                    change: Some(signed_percent(kpis.period_comparison.net_sales_change)),
                    trend: Some(direction(kpis.period_comparison.net_sales_change)),
                },
                KeyMetric {
                    label: "Labor Cost %".into(),
                    value: format!("{:.1}%", kpis.labor_cost_percentage),
                    change: None,
                    trend: Some(if kpis.labor_cost_percentage > 30.0 {
                        TrendDirection::Down
                    } else {
                        TrendDirection::Up
                    }),
                },
            ],
            insights: vec![
                "Complete financial overview".into(),
                "Expense breakdown".into(),
                "Margin analysis".into(),
            ],
        }
    }

    fn preview_daily(options: &ReportOptions, today: NaiveDate) -> ReportPreview {
        let range = options.date_range.unwrap_or_else(|| time::yesterday(today));

        ReportPreview {
            title: format!(
                "Daily Sales Dashboard - {}",
                range.start.format("%b %d, %Y")
            ),
            summary: "Real-time daily sales metrics and performance indicators with live data \
                      updates."
                .into(),
            key_metrics: vec![
                KeyMetric {
                    label: "Live Updates".into(),
                    value: "Enabled".into(),
                    change: None,
                    trend: None,
                },
                KeyMetric {
                    label: "Report Type".into(),
                    value: "Dashboard view".into(),
                    change: None,
                    trend: None,
                },
            ],
            insights: vec![
                "Hourly breakdown available".into(),
                "Staff performance metrics".into(),
                "Real-time alerts".into(),
            ],
        }
    }
}

fn signed_percent(change: f64) -> String {
    format!("{}{:.1}%", if change >= 0.0 { "+" } else { "" }, change)
}

fn direction(change: f64) -> TrendDirection {
    if change >= 0.0 {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    }
}
