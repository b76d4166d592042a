//! Pure KPI arithmetic
//!
//! Everything in this module is a total function over its inputs; all
//! data access lives in the service layer. Derived ratios guard their
//! denominators and return zero instead of dividing by it.

use shared::models::{KpiCore, SalesRecord};

/// Fitted least-squares line over a series indexed 1..=n
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
}

/// Aggregate a record set into core KPIs
///
/// Sums are plain additions over the records, so the aggregate over a
/// range equals the sum of the aggregates over any partition of it.
pub fn compute_metrics(records: &[SalesRecord]) -> KpiCore {
    let gross_sales: f64 = records.iter().map(|r| r.gross_sales).sum();
    let net_sales: f64 = records.iter().map(|r| r.net_sales).sum();
    let order_count: i64 = records.iter().map(|r| r.order_count).sum();
    let labor_cost: f64 = records.iter().map(|r| r.labor.cost).sum();
    let tips: f64 = records.iter().map(|r| r.payment_breakdown.tips).sum();

    // Order value is measured on net sales, after discounts and refunds
    let average_order_value = if order_count > 0 {
        net_sales / order_count as f64
    } else {
        0.0
    };
    let labor_cost_percentage = if gross_sales > 0.0 {
        labor_cost / gross_sales * 100.0
    } else {
        0.0
    };

    KpiCore {
        gross_sales,
        net_sales,
        order_count,
        average_order_value,
        labor_cost_percentage,
        tips,
    }
}

/// Percentage change from `old` to `new`
///
/// A zero baseline reports 100 when there is any growth and 0 otherwise,
/// never a division by zero.
pub fn percentage_change(old: f64, new: f64) -> f64 {
    if old == 0.0 {
        return if new > 0.0 { 100.0 } else { 0.0 };
    }
    (new - old) / old * 100.0
}

/// Coefficient of variation: standard deviation over mean
///
/// Zero for empty series or a zero mean.
pub fn volatility(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if mean == 0.0 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt() / mean
}

/// Ordinary least squares over y-values at x = 1..=n
pub fn linear_trend(values: &[f64]) -> LinearTrend {
    let n = values.len() as f64;
    if values.is_empty() {
        return LinearTrend {
            slope: 0.0,
            intercept: 0.0,
        };
    }

    // Closed forms for sum(x) and sum(x^2) with x = 1..=n
    let sum_x = n * (n + 1.0) / 2.0;
    let sum_xx = n * (n + 1.0) * (2.0 * n + 1.0) / 6.0;
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values
        .iter()
        .enumerate()
        .map(|(i, y)| (i as f64 + 1.0) * y)
        .sum();

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return LinearTrend {
            slope: 0.0,
            intercept: values[0],
        };
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    LinearTrend { slope, intercept }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(gross: f64, net: f64, orders: i64, labor_cost: f64, tips: f64) -> SalesRecord {
        let mut r: SalesRecord =
            serde_json::from_str(r#"{"date":"2024-01-01","location":"Store A"}"#).unwrap();
        r.gross_sales = gross;
        r.net_sales = net;
        r.order_count = orders;
        r.labor.cost = labor_cost;
        r.payment_breakdown.tips = tips;
        r
    }

    #[test]
    fn test_empty_set_is_all_zero() {
        let kpis = compute_metrics(&[]);
        assert_eq!(kpis, KpiCore::default());
    }

    #[test]
    fn test_zero_denominators_yield_zero_ratios() {
        // Orders without gross sales, gross sales without orders
        let no_gross = compute_metrics(&[record(0.0, 0.0, 10, 50.0, 0.0)]);
        assert_eq!(no_gross.average_order_value, 0.0);
        assert_eq!(no_gross.labor_cost_percentage, 0.0);

        let no_orders = compute_metrics(&[record(500.0, 450.0, 0, 100.0, 0.0)]);
        assert_eq!(no_orders.average_order_value, 0.0);
        assert_eq!(no_orders.labor_cost_percentage, 20.0);
    }

    #[test]
    fn test_sums_are_additive_over_partitions() {
        let a = record(100.0, 90.0, 10, 30.0, 5.0);
        let b = record(200.0, 180.0, 20, 60.0, 10.0);
        let c = record(300.0, 270.0, 30, 90.0, 15.0);

        let whole = compute_metrics(&[a.clone(), b.clone(), c.clone()]);
        let left = compute_metrics(&[a]);
        let right = compute_metrics(&[b, c]);

        assert_eq!(whole.gross_sales, left.gross_sales + right.gross_sales);
        assert_eq!(whole.net_sales, left.net_sales + right.net_sales);
        assert_eq!(whole.order_count, left.order_count + right.order_count);
        assert_eq!(whole.tips, left.tips + right.tips);
    }

    #[test]
    fn test_average_order_value_is_net_based() {
        let kpis = compute_metrics(&[record(300.0, 270.0, 10, 0.0, 0.0)]);
        assert_eq!(kpis.average_order_value, 27.0);

        // Heavy discounting must show up in the order value
        let discounted = compute_metrics(&[record(1000.0, 900.0, 50, 0.0, 0.0)]);
        assert_eq!(discounted.average_order_value, 18.0);
    }

    #[test]
    fn test_percentage_change_zero_baseline() {
        assert_eq!(percentage_change(0.0, 50.0), 100.0);
        assert_eq!(percentage_change(0.0, 0.0), 0.0);
        assert_eq!(percentage_change(0.0, -5.0), 0.0);
    }

    #[test]
    fn test_percentage_change_nonzero_baseline() {
        assert_eq!(percentage_change(100.0, 150.0), 50.0);
        assert_eq!(percentage_change(100.0, 50.0), -50.0);
        assert_eq!(percentage_change(200.0, 200.0), 0.0);
    }

    #[test]
    fn test_volatility_constant_series_is_zero() {
        assert_eq!(volatility(&[100.0, 100.0, 100.0]), 0.0);
        assert_eq!(volatility(&[]), 0.0);
        assert_eq!(volatility(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_volatility_is_scale_free() {
        let small = volatility(&[90.0, 100.0, 110.0]);
        let large = volatility(&[900.0, 1000.0, 1100.0]);
        assert!((small - large).abs() < 1e-12);
    }

    #[test]
    fn test_linear_trend_exact_line() {
        // y = 2x + 1 at x = 1..=5
        let trend = linear_trend(&[3.0, 5.0, 7.0, 9.0, 11.0]);
        assert!((trend.slope - 2.0).abs() < 1e-9);
        assert!((trend.intercept - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_trend_degenerate_inputs() {
        assert_eq!(linear_trend(&[]).slope, 0.0);
        let single = linear_trend(&[42.0]);
        assert_eq!(single.slope, 0.0);
        assert_eq!(single.intercept, 42.0);
    }
}
