//! Rule-based performance insights
//!
//! Fixed thresholds over the computed KPIs and trend series. All rules
//! use strict comparisons, so a change of exactly 10% does not fire the
//! growth rule. At most one of the revenue rules fires per evaluation.

use shared::models::{Impact, InsightKind, KpiMetrics, PerformanceInsight, TrendDirection, TrendPoint};

use super::metrics::volatility;

const REVENUE_GROWTH_THRESHOLD: f64 = 10.0;
const REVENUE_DECLINE_THRESHOLD: f64 = -5.0;
const LABOR_COST_ALERT_THRESHOLD: f64 = 35.0;
const ORDER_VALUE_GROWTH_THRESHOLD: f64 = 5.0;
const VOLATILITY_MIN_POINTS: usize = 7;
const VOLATILITY_THRESHOLD: f64 = 0.2;

/// Evaluate every insight rule against one period's KPIs and trend
pub fn evaluate_insights(kpis: &KpiMetrics, trend: &[TrendPoint]) -> Vec<PerformanceInsight> {
    let mut insights = Vec::new();
    let comparison = &kpis.period_comparison;

    if comparison.gross_sales_change > REVENUE_GROWTH_THRESHOLD {
        insights.push(PerformanceInsight {
            id: "revenue-growth".into(),
            kind: InsightKind::Achievement,
            title: "Strong Revenue Growth".into(),
            description: format!(
                "Gross sales increased by {:.1}% compared to previous period",
                comparison.gross_sales_change
            ),
            impact: Impact::High,
            actionable: false,
            related_metric: "grossSales".into(),
            value: Some(comparison.gross_sales_change),
            trend: Some(TrendDirection::Up),
        });
    } else if comparison.gross_sales_change < REVENUE_DECLINE_THRESHOLD {
        insights.push(PerformanceInsight {
            id: "revenue-decline".into(),
            kind: InsightKind::Alert,
            title: "Revenue Decline Alert".into(),
            description: format!(
                "Gross sales decreased by {:.1}% compared to previous period",
                comparison.gross_sales_change.abs()
            ),
            impact: Impact::High,
            actionable: true,
            related_metric: "grossSales".into(),
            value: Some(comparison.gross_sales_change),
            trend: Some(TrendDirection::Down),
        });
    }

    if kpis.labor_cost_percentage > LABOR_COST_ALERT_THRESHOLD {
        insights.push(PerformanceInsight {
            id: "high-labor-cost".into(),
            kind: InsightKind::Alert,
            title: "High Labor Cost Percentage".into(),
            description: format!(
                "Labor costs are {:.1}% of sales, consider optimizing staffing",
                kpis.labor_cost_percentage
            ),
            impact: Impact::Medium,
            actionable: true,
            related_metric: "laborCost".into(),
            value: Some(kpis.labor_cost_percentage),
            trend: Some(TrendDirection::Up),
        });
    }

    if comparison.average_order_value_change > ORDER_VALUE_GROWTH_THRESHOLD {
        insights.push(PerformanceInsight {
            id: "order-value-growth".into(),
            kind: InsightKind::Achievement,
            title: "Average Order Value Increase".into(),
            description: format!(
                "Average order value improved by {:.1}%",
                comparison.average_order_value_change
            ),
            impact: Impact::Medium,
            actionable: false,
            related_metric: "averageOrderValue".into(),
            value: Some(comparison.average_order_value_change),
            trend: Some(TrendDirection::Up),
        });
    }

    if trend.len() > VOLATILITY_MIN_POINTS {
        let gross_series: Vec<f64> = trend.iter().map(|p| p.gross_sales).collect();
        let v = volatility(&gross_series);
        if v > VOLATILITY_THRESHOLD {
            insights.push(PerformanceInsight {
                id: "sales-volatility".into(),
                kind: InsightKind::Opportunity,
                title: "Sales Volatility Detected".into(),
                description:
                    "Sales patterns show high variability, consider implementing consistent promotional strategies"
                        .into(),
                impact: Impact::Medium,
                actionable: true,
                related_metric: "salesVolatility".into(),
                value: Some(v),
                trend: Some(TrendDirection::Stable),
            });
        }
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::PeriodComparison;

    fn kpis_with(comparison: PeriodComparison, labor_pct: f64) -> KpiMetrics {
        KpiMetrics {
            labor_cost_percentage: labor_pct,
            period_comparison: comparison,
            ..Default::default()
        }
    }

    fn trend_point(day: u32, gross: f64) -> TrendPoint {
        TrendPoint {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            gross_sales: gross,
            net_sales: gross * 0.9,
            order_count: 10,
            average_order_value: gross / 10.0,
        }
    }

    #[test]
    fn test_growth_threshold_is_strict() {
        let at = kpis_with(
            PeriodComparison {
                gross_sales_change: 10.0,
                ..Default::default()
            },
            0.0,
        );
        assert!(evaluate_insights(&at, &[]).is_empty());

        let above = kpis_with(
            PeriodComparison {
                gross_sales_change: 10.01,
                ..Default::default()
            },
            0.0,
        );
        let insights = evaluate_insights(&above, &[]);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].id, "revenue-growth");
        assert_eq!(insights[0].kind, InsightKind::Achievement);
    }

    #[test]
    fn test_decline_alert() {
        let kpis = kpis_with(
            PeriodComparison {
                gross_sales_change: -8.0,
                ..Default::default()
            },
            0.0,
        );
        let insights = evaluate_insights(&kpis, &[]);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].id, "revenue-decline");
        assert!(insights[0].actionable);
        // Description reports the magnitude, not the sign
        assert!(insights[0].description.contains("decreased by 8.0%"));
    }

    #[test]
    fn test_revenue_rules_are_exclusive() {
        // Exactly -5 fires neither revenue rule
        let kpis = kpis_with(
            PeriodComparison {
                gross_sales_change: -5.0,
                ..Default::default()
            },
            0.0,
        );
        assert!(evaluate_insights(&kpis, &[]).is_empty());
    }

    #[test]
    fn test_labor_cost_threshold_is_strict() {
        let at = kpis_with(PeriodComparison::default(), 35.0);
        assert!(evaluate_insights(&at, &[]).is_empty());

        let above = kpis_with(PeriodComparison::default(), 36.5);
        let insights = evaluate_insights(&above, &[]);
        assert_eq!(insights[0].id, "high-labor-cost");
        assert!(insights[0].description.contains("36.5%"));
    }

    #[test]
    fn test_order_value_growth() {
        let kpis = kpis_with(
            PeriodComparison {
                average_order_value_change: 6.0,
                ..Default::default()
            },
            0.0,
        );
        let insights = evaluate_insights(&kpis, &[]);
        assert_eq!(insights[0].id, "order-value-growth");
    }

    #[test]
    fn test_volatility_needs_more_than_seven_points() {
        let kpis = kpis_with(PeriodComparison::default(), 0.0);
        // Alternating series, high variability
        let series: Vec<TrendPoint> = (1..=7)
            .map(|d| trend_point(d, if d % 2 == 0 { 1000.0 } else { 100.0 }))
            .collect();
        assert!(evaluate_insights(&kpis, &series).is_empty());

        let longer: Vec<TrendPoint> = (1..=8)
            .map(|d| trend_point(d, if d % 2 == 0 { 1000.0 } else { 100.0 }))
            .collect();
        let insights = evaluate_insights(&kpis, &longer);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].id, "sales-volatility");
        assert_eq!(insights[0].kind, InsightKind::Opportunity);
    }

    #[test]
    fn test_stable_long_trend_stays_quiet() {
        let kpis = kpis_with(PeriodComparison::default(), 0.0);
        let series: Vec<TrendPoint> = (1..=10).map(|d| trend_point(d, 500.0)).collect();
        assert!(evaluate_insights(&kpis, &series).is_empty());
    }

    #[test]
    fn test_multiple_rules_can_fire_together() {
        let kpis = kpis_with(
            PeriodComparison {
                gross_sales_change: 15.0,
                average_order_value_change: 7.0,
                ..Default::default()
            },
            40.0,
        );
        let insights = evaluate_insights(&kpis, &[]);
        let ids: Vec<&str> = insights.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["revenue-growth", "high-labor-cost", "order-value-growth"]
        );
    }
}
