//! Sales forecast projection
//!
//! Straight-line least-squares fit over the daily gross-sales history,
//! projected forward day by day. Confidence decays with horizon and is
//! floored; predictions are clamped at zero.

use chrono::Duration;
use shared::models::{ForecastPoint, TrendPoint};

use super::metrics::linear_trend;

/// History shorter than this produces no forecast at all
pub const MIN_HISTORY_POINTS: usize = 14;

const CONFIDENCE_DECAY_PER_DAY: f64 = 0.1;
const CONFIDENCE_FLOOR: f64 = 0.5;

/// Project `days` points past the end of `history`
///
/// Returns an empty forecast when the history is too short to fit a
/// meaningful line.
pub fn project(history: &[TrendPoint], days: u32) -> Vec<ForecastPoint> {
    if history.len() < MIN_HISTORY_POINTS {
        return Vec::new();
    }

    let series: Vec<f64> = history.iter().map(|p| p.gross_sales).collect();
    let trend = linear_trend(&series);
    let n = series.len() as f64;
    let last_date = match history.last() {
        Some(point) => point.date,
        None => return Vec::new(),
    };

    (1..=days as i64)
        .map(|i| {
            let predicted = trend.slope * (n + i as f64) + trend.intercept;
            ForecastPoint {
                date: last_date + Duration::days(i),
                predicted: predicted.max(0.0),
                confidence: (1.0 - i as f64 * CONFIDENCE_DECAY_PER_DAY).max(CONFIDENCE_FLOOR),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn history(values: &[f64]) -> Vec<TrendPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &gross)| TrendPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + Duration::days(i as i64),
                gross_sales: gross,
                net_sales: gross * 0.9,
                order_count: 10,
                average_order_value: gross / 10.0,
            })
            .collect()
    }

    #[test]
    fn test_short_history_yields_empty_forecast() {
        let points = history(&[100.0; 13]);
        assert!(project(&points, 7).is_empty());
    }

    #[test]
    fn test_fourteen_points_is_enough() {
        let points = history(&[100.0; 14]);
        assert_eq!(project(&points, 7).len(), 7);
    }

    #[test]
    fn test_flat_history_projects_flat() {
        let points = history(&[250.0; 20]);
        let forecast = project(&points, 3);
        for point in &forecast {
            assert!((point.predicted - 250.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_dates_continue_from_history_end() {
        let points = history(&[100.0; 14]);
        let last = points.last().unwrap().date;
        let forecast = project(&points, 3);
        assert_eq!(forecast[0].date, last + Duration::days(1));
        assert_eq!(forecast[2].date, last + Duration::days(3));
    }

    #[test]
    fn test_confidence_decays_to_floor() {
        let points = history(&[100.0; 20]);
        let forecast = project(&points, 10);
        assert!((forecast[0].confidence - 0.9).abs() < 1e-9);
        assert!((forecast[4].confidence - 0.5).abs() < 1e-9);
        // Floor holds past day five
        for point in &forecast[5..] {
            assert_eq!(point.confidence, 0.5);
        }
    }

    #[test]
    fn test_declining_trend_never_goes_negative() {
        // Steep decline crossing zero inside the forecast horizon
        let values: Vec<f64> = (0..14).map(|i| 130.0 - 10.0 * i as f64).collect();
        let points = history(&values);
        let forecast = project(&points, 10);
        assert!(forecast.iter().all(|p| p.predicted >= 0.0));
        // The tail is clamped, not merely near zero
        assert_eq!(forecast.last().unwrap().predicted, 0.0);
    }
}
