//! Forecast Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One projected day of gross sales
///
/// `confidence` decreases monotonically with distance from the last known
/// day: 0.9 for the first projected day, floored at 0.5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted: f64,
    pub confidence: f64,
}
