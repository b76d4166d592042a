//! Remote Sales Store
//!
//! Talks to the hosted sales database over the SurrealDB `any` engine.
//! Rows are stored flat (snake_case scalars plus breakdown arrays) and
//! reshaped here into the nested [`SalesRecord`] the pipeline works with.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use shared::models::{
    AnalyticsSnapshot, BreakdownLine, LaborMetrics, PaymentBreakdown, SalesRecord,
};
use shared::{AppError, AppResult, DateRange};
use surrealdb::Surreal;
use surrealdb::engine::any::{Any, connect};

use super::SalesStore;

const FETCH_RANGE_QUERY: &str = r#"
    SELECT
        <string>id AS id, date, location, team_id,
        gross_sales, net_sales, order_count, order_average,
        labor_cost, labor_hours, labor_percentage, sales_per_labor_hour,
        non_cash, total_cash, calculated_cash, tips,
        destinations, revenue_items, tenders, discounts, promotions, taxes,
        voids, refunds, surcharges, expenses
    FROM sales_record
    WHERE date >= $start AND date <= $end
"#;

/// Flat row shape as persisted upstream
#[derive(Debug, Deserialize)]
struct SalesRow {
    #[serde(default)]
    id: String,
    date: NaiveDate,
    location: String,
    #[serde(default)]
    team_id: Option<String>,
    #[serde(default)]
    gross_sales: f64,
    #[serde(default)]
    net_sales: f64,
    #[serde(default)]
    order_count: i64,
    #[serde(default)]
    order_average: f64,
    #[serde(default)]
    labor_cost: f64,
    #[serde(default)]
    labor_hours: f64,
    #[serde(default)]
    labor_percentage: f64,
    #[serde(default)]
    sales_per_labor_hour: f64,
    #[serde(default)]
    non_cash: f64,
    #[serde(default)]
    total_cash: f64,
    #[serde(default)]
    calculated_cash: f64,
    #[serde(default)]
    tips: f64,
    #[serde(default)]
    destinations: Vec<BreakdownLine>,
    #[serde(default)]
    revenue_items: Vec<BreakdownLine>,
    #[serde(default)]
    tenders: Vec<BreakdownLine>,
    #[serde(default)]
    discounts: Vec<BreakdownLine>,
    #[serde(default)]
    promotions: Vec<BreakdownLine>,
    #[serde(default)]
    taxes: Vec<BreakdownLine>,
    #[serde(default)]
    voids: f64,
    #[serde(default)]
    refunds: f64,
    #[serde(default)]
    surcharges: f64,
    #[serde(default)]
    expenses: f64,
}

impl SalesRow {
    fn into_record(self) -> SalesRecord {
        SalesRecord {
            id: self.id,
            date: self.date,
            location: self.location,
            team_id: self.team_id,
            gross_sales: self.gross_sales,
            net_sales: self.net_sales,
            order_count: self.order_count,
            order_average: self.order_average,
            labor: LaborMetrics {
                cost: self.labor_cost,
                hours: self.labor_hours,
                percentage: self.labor_percentage,
                sales_per_labor_hour: self.sales_per_labor_hour,
            },
            payment_breakdown: PaymentBreakdown {
                non_cash: self.non_cash,
                total_cash: self.total_cash,
                calculated_cash: self.calculated_cash,
                tips: self.tips,
            },
            destinations: self.destinations,
            revenue_items: self.revenue_items,
            tenders: self.tenders,
            discounts: self.discounts,
            promotions: self.promotions,
            taxes: self.taxes,
            voids: self.voids,
            refunds: self.refunds,
            surcharges: self.surcharges,
            expenses: self.expenses,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreatedSnapshot {
    #[allow(dead_code)]
    id: surrealdb::RecordId,
}

pub struct RemoteSalesStore {
    db: Surreal<Any>,
}

impl RemoteSalesStore {
    /// Connect and select the namespace/database used for sales data
    pub async fn connect(url: &str, namespace: &str, database: &str) -> AppResult<Self> {
        let db = connect(url)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to {}: {}", url, e)))?;
        db.use_ns(namespace)
            .use_db(database)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        Ok(Self { db })
    }
}

#[async_trait]
impl SalesStore for RemoteSalesStore {
    async fn fetch_range(
        &self,
        range: &DateRange,
        team_id: Option<&str>,
    ) -> AppResult<Vec<SalesRecord>> {
        let mut query = FETCH_RANGE_QUERY.to_string();
        if team_id.is_some() {
            query.push_str(" AND team_id = $team");
        }
        query.push_str(" ORDER BY date ASC");

        let mut request = self
            .db
            .query(query)
            .bind(("start", range.start.to_string()))
            .bind(("end", range.end.to_string()));
        if let Some(team) = team_id {
            request = request.bind(("team", team.to_string()));
        }

        let rows: Vec<SalesRow> = request
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .take(0)
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok(rows.into_iter().map(SalesRow::into_record).collect())
    }

    async fn current_organization(&self) -> AppResult<Option<String>> {
        let org: Option<String> = self
            .db
            .query("RETURN fn::current_organization()")
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .take(0)
            .map_err(|e| AppError::database(e.to_string()))?;
        Ok(org)
    }

    async fn write_snapshot(&self, snapshot: AnalyticsSnapshot) -> AppResult<()> {
        let created: Option<CreatedSnapshot> = self
            .db
            .create("analytics_snapshot")
            .content(snapshot)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        if created.is_none() {
            return Err(AppError::database(
                "Analytics snapshot insert returned no record",
            ));
        }
        Ok(())
    }
}
