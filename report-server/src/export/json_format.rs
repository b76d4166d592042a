//! JSON encoders
//!
//! Pretty-printed payloads with an export metadata header. The sales
//! export defaults to a reduced per-record shape; `include_raw_data`
//! switches to the full records.

use chrono::{SecondsFormat, Utc};
use serde_json::json;
use shared::models::{KpiMetrics, PerformanceInsight, SalesRecord};
use shared::{AppError, AppResult};

use super::ExportOptions;

fn metadata(options: &ExportOptions) -> serde_json::Value {
    json!({
        "exportDate": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "dateRange": options.date_range.map(|r| json!({
            "start": r.start,
            "end": r.end,
        })),
        "teamId": options.team_id,
    })
}

pub fn sales_to_json(records: &[SalesRecord], options: &ExportOptions) -> AppResult<Vec<u8>> {
    let data = if options.include_raw_data {
        serde_json::to_value(records)
            .map_err(|e| AppError::encoding(format!("JSON encoding failed: {}", e)))?
    } else {
        records
            .iter()
            .map(|sale| {
                json!({
                    "id": sale.id,
                    "date": sale.date,
                    "location": sale.location,
                    "team_id": sale.team_id,
                    "grossSales": sale.gross_sales,
                    "netSales": sale.net_sales,
                    "orderCount": sale.order_count,
                    "orderAverage": sale.order_average,
                })
            })
            .collect()
    };

    let mut meta = metadata(options);
    meta["recordCount"] = json!(records.len());
    let payload = json!({
        "metadata": meta,
        "data": data,
    });

    serde_json::to_vec_pretty(&payload)
        .map_err(|e| AppError::encoding(format!("JSON encoding failed: {}", e)))
}

pub fn analytics_to_json(
    kpis: &KpiMetrics,
    insights: &[PerformanceInsight],
    options: &ExportOptions,
) -> AppResult<Vec<u8>> {
    let insights: &[PerformanceInsight] = if options.include_insights {
        insights
    } else {
        &[]
    };
    let payload = json!({
        "metadata": metadata(options),
        "kpiMetrics": kpis,
        "insights": insights,
    });

    serde_json::to_vec_pretty(&payload)
        .map_err(|e| AppError::encoding(format!("JSON encoding failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportFormat;
    use shared::DateRange;

    fn record(date: &str, gross: f64) -> SalesRecord {
        let json = format!(
            r#"{{"id":"r-{}","date":"{}","location":"Store A","grossSales":{}}}"#,
            date, date, gross
        );
        serde_json::from_str(&json).unwrap()
    }

    fn options() -> ExportOptions {
        ExportOptions {
            format: ExportFormat::Json,
            date_range: Some(DateRange::parse("2024-01-01", "2024-01-31").unwrap()),
            team_id: Some("team-1".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_metadata_block() {
        let bytes = sales_to_json(&[record("2024-01-01", 100.0)], &options()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let meta = &value["metadata"];
        assert_eq!(meta["recordCount"], 1);
        assert_eq!(meta["teamId"], "team-1");
        assert_eq!(meta["dateRange"]["start"], "2024-01-01");
        assert!(meta["exportDate"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_null_metadata_when_unset() {
        let bytes = sales_to_json(&[], &ExportOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(value["metadata"]["dateRange"].is_null());
        assert!(value["metadata"]["teamId"].is_null());
    }

    #[test]
    fn test_reduced_shape_by_default() {
        let bytes = sales_to_json(&[record("2024-01-01", 100.0)], &options()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let first = &value["data"][0];
        assert_eq!(first["grossSales"], 100.0);
        // Reduced rows omit the nested figures
        assert!(first.get("labor").is_none());
        assert!(first.get("paymentBreakdown").is_none());
    }

    #[test]
    fn test_raw_shape_when_requested() {
        let opts = ExportOptions {
            include_raw_data: true,
            ..options()
        };
        let bytes = sales_to_json(&[record("2024-01-01", 100.0)], &opts).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(value["data"][0].get("labor").is_some());
    }

    #[test]
    fn test_insights_omitted_when_disabled() {
        let opts = ExportOptions {
            include_insights: false,
            ..options()
        };
        let bytes = analytics_to_json(&KpiMetrics::default(), &[], &opts).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["insights"], serde_json::json!([]));
        assert!(value["kpiMetrics"].get("periodComparison").is_some());
    }
}
