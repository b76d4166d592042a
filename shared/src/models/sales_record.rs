//! Sales Record Model
//!
//! One observation for one location/team on one calendar day, sourced
//! read-only from the sales data store. The pipeline never mutates or
//! persists these; it only aggregates and re-renders them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named amount inside one of the per-record breakdown collections
/// (destinations, revenue items, tenders, discounts, promotions, taxes)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakdownLine {
    pub name: String,
    #[serde(default)]
    pub total: f64,
}

/// Labor figures for one day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborMetrics {
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub hours: f64,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub sales_per_labor_hour: f64,
}

/// Cash / non-cash / tips split for one day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBreakdown {
    #[serde(default)]
    pub non_cash: f64,
    #[serde(default)]
    pub total_cash: f64,
    #[serde(default)]
    pub calculated_cash: f64,
    #[serde(default)]
    pub tips: f64,
}

/// One day of sales for one location/team
///
/// `date` uniquely identifies at most one record per `(location, team_id)`
/// pair in a well-formed dataset; the pipeline assumes this rather than
/// enforcing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(default)]
    pub id: String,
    pub date: NaiveDate,
    pub location: String,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(rename = "grossSales", default)]
    pub gross_sales: f64,
    #[serde(rename = "netSales", default)]
    pub net_sales: f64,
    #[serde(rename = "orderCount", default)]
    pub order_count: i64,
    #[serde(rename = "orderAverage", default)]
    pub order_average: f64,
    #[serde(default)]
    pub labor: LaborMetrics,
    #[serde(rename = "paymentBreakdown", default)]
    pub payment_breakdown: PaymentBreakdown,

    // -- Breakdown collections (default empty when absent upstream) --
    #[serde(default)]
    pub destinations: Vec<BreakdownLine>,
    #[serde(rename = "revenueItems", default)]
    pub revenue_items: Vec<BreakdownLine>,
    #[serde(default)]
    pub tenders: Vec<BreakdownLine>,
    #[serde(default)]
    pub discounts: Vec<BreakdownLine>,
    #[serde(default)]
    pub promotions: Vec<BreakdownLine>,
    #[serde(default)]
    pub taxes: Vec<BreakdownLine>,

    // -- Scalar adjustments --
    #[serde(default)]
    pub voids: f64,
    #[serde(default)]
    pub refunds: f64,
    #[serde(default)]
    pub surcharges: f64,
    #[serde(default)]
    pub expenses: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names() {
        let record = SalesRecord {
            id: "r1".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            location: "Store A".into(),
            team_id: Some("team-1".into()),
            gross_sales: 1000.0,
            net_sales: 900.0,
            order_count: 50,
            order_average: 18.0,
            labor: LaborMetrics {
                cost: 300.0,
                hours: 40.0,
                percentage: 30.0,
                sales_per_labor_hour: 25.0,
            },
            payment_breakdown: PaymentBreakdown {
                non_cash: 700.0,
                total_cash: 300.0,
                calculated_cash: 295.0,
                tips: 80.0,
            },
            destinations: vec![],
            revenue_items: vec![],
            tenders: vec![],
            discounts: vec![],
            promotions: vec![],
            taxes: vec![],
            voids: 0.0,
            refunds: 0.0,
            surcharges: 0.0,
            expenses: 0.0,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["grossSales"], 1000.0);
        assert_eq!(json["team_id"], "team-1");
        assert_eq!(json["labor"]["salesPerLaborHour"], 25.0);
        assert_eq!(json["paymentBreakdown"]["nonCash"], 700.0);
        assert_eq!(json["revenueItems"], serde_json::json!([]));
    }

    #[test]
    fn test_absent_numerics_default_to_zero() {
        let json = r#"{"date":"2024-01-01","location":"Store A"}"#;
        let record: SalesRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.gross_sales, 0.0);
        assert_eq!(record.order_count, 0);
        assert_eq!(record.labor.cost, 0.0);
        assert!(record.discounts.is_empty());
        assert!(record.team_id.is_none());
    }
}
