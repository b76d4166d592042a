//! Performance Insight Model
//!
//! Advisory records generated fresh on each request; never persisted by the
//! read path (the snapshot write path embeds them as JSON).

use serde::{Deserialize, Serialize};

/// What kind of advisory this is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Achievement,
    Alert,
    Opportunity,
}

/// How much the finding matters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

/// Direction of the underlying metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

/// One advisory record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceInsight {
    /// Stable slug, e.g. `revenue-growth`
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub actionable: bool,
    /// Slug naming which KPI triggered this insight
    pub related_metric: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendDirection>,
}
