//! Location Performance Model

use serde::{Deserialize, Serialize};

/// Per-location/team aggregate with a descending gross-sales ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPerformance {
    pub location: String,
    pub team_id: String,
    pub gross_sales: f64,
    pub net_sales: f64,
    pub order_count: i64,
    pub average_order_value: f64,
    /// Orders per distinct trading day
    pub efficiency: f64,
    /// 1 = highest gross sales; ties keep original iteration order
    pub ranking: u32,
}
