//! Analytics Snapshot Model
//!
//! One-way write of a computed KPI + insights bundle, tagged with the
//! owning organization and the period it covers. Field names match the
//! persisted row shape (snake_case).

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::insight::PerformanceInsight;
use super::kpi::KpiMetrics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub snapshot_type: String,
    /// `"{start}_to_{end}"`
    pub time_period: String,
    pub organization_id: String,
    pub metrics_data: serde_json::Value,
}

impl AnalyticsSnapshot {
    /// Build a KPI-metrics snapshot for a period
    pub fn kpi_metrics(
        time_period: String,
        organization_id: String,
        kpis: &KpiMetrics,
        insights: &[PerformanceInsight],
    ) -> Self {
        Self {
            snapshot_type: "kpi_metrics".to_string(),
            time_period,
            organization_id,
            metrics_data: json!({
                "kpiMetrics": kpis,
                "insights": insights,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_shape() {
        let kpis = KpiMetrics::default();
        let snap = AnalyticsSnapshot::kpi_metrics(
            "2024-01-01_to_2024-01-31".into(),
            "org-1".into(),
            &kpis,
            &[],
        );
        assert_eq!(snap.snapshot_type, "kpi_metrics");
        assert_eq!(snap.time_period, "2024-01-01_to_2024-01-31");
        assert!(snap.metrics_data.get("kpiMetrics").is_some());
        assert_eq!(snap.metrics_data["insights"], serde_json::json!([]));
    }
}
