//! Report Template and Preview Models

use serde::{Deserialize, Serialize};

use super::insight::TrendDirection;

/// Which canned report to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    WeeklySalesSummary,
    MonthlyPnl,
    DailySalesDashboard,
    SalesTrendsAnalysis,
    PaymentMethods,
    TaxSummary,
}

/// Catalog entry describing one available report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTemplate {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub kind: ReportKind,
}

/// One headline figure in a report preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetric {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendDirection>,
}

/// Lightweight summary of a report, produced without running the encoder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPreview {
    pub title: String,
    pub summary: String,
    pub key_metrics: Vec<KeyMetric>,
    pub insights: Vec<String>,
}
