//! KPI Aggregate Models
//!
//! Derived figures only; nothing here is ever persisted. Recomputed from
//! raw records on every query.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregate of a record set over a period, without the period comparison
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiCore {
    pub gross_sales: f64,
    pub net_sales: f64,
    pub order_count: i64,
    pub average_order_value: f64,
    pub labor_cost_percentage: f64,
    pub tips: f64,
}

impl KpiCore {
    /// Attach a period comparison to form the full KPI set
    pub fn with_comparison(self, period_comparison: PeriodComparison) -> KpiMetrics {
        KpiMetrics {
            gross_sales: self.gross_sales,
            net_sales: self.net_sales,
            order_count: self.order_count,
            average_order_value: self.average_order_value,
            labor_cost_percentage: self.labor_cost_percentage,
            tips: self.tips,
            period_comparison,
        }
    }
}

/// Percentage deltas against the immediately preceding, equal-length period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodComparison {
    pub gross_sales_change: f64,
    pub net_sales_change: f64,
    pub order_count_change: f64,
    pub average_order_value_change: f64,
}

/// Full KPI set for a period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiMetrics {
    pub gross_sales: f64,
    pub net_sales: f64,
    pub order_count: i64,
    pub average_order_value: f64,
    pub labor_cost_percentage: f64,
    pub tips: f64,
    pub period_comparison: PeriodComparison,
}

/// One day of the KPI time series, ordered ascending by date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub gross_sales: f64,
    pub net_sales: f64,
    pub order_count: i64,
    pub average_order_value: f64,
}
