//! Weekly Rollup Model
//!
//! A pre-aggregated Monday-to-Sunday summary of daily records. Consumed by
//! the weekly export path; the totals are plain sums over the contained
//! daily records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::sales_record::SalesRecord;

/// Summed figures for one week
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTotals {
    pub gross_total: f64,
    pub net_sales: f64,
    pub non_cash: f64,
    pub total_cash: f64,
    pub tips: f64,
    pub discount: f64,
    pub tax_paid: f64,
}

/// One week of daily sales for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySales {
    pub location: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub daily_sales: Vec<SalesRecord>,
    pub totals: WeeklyTotals,
}
