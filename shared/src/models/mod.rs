//! Domain Models
//!
//! Wire-format types shared between the server, its tests, and any client
//! dashboard. JSON field names are part of the contract and are pinned with
//! serde renames.

pub mod forecast;
pub mod insight;
pub mod kpi;
pub mod location;
pub mod report;
pub mod sales_record;
pub mod snapshot;
pub mod weekly;

pub use forecast::ForecastPoint;
pub use insight::{Impact, InsightKind, PerformanceInsight, TrendDirection};
pub use kpi::{KpiCore, KpiMetrics, PeriodComparison, TrendPoint};
pub use location::LocationPerformance;
pub use report::{KeyMetric, ReportKind, ReportPreview, ReportTemplate};
pub use sales_record::{BreakdownLine, LaborMetrics, PaymentBreakdown, SalesRecord};
pub use snapshot::AnalyticsSnapshot;
pub use weekly::{WeeklySales, WeeklyTotals};
