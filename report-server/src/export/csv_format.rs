//! CSV encoders
//!
//! Every cell is quoted, matching the downloads the dashboard has always
//! produced. Column layouts are fixed; callers can only append the closed
//! set of custom columns to the sales layout.

use chrono::{Datelike, Weekday};
use csv::{QuoteStyle, WriterBuilder};
use shared::models::{SalesRecord, WeeklySales};
use shared::{AppError, AppResult};

use super::ExportOptions;

const SALES_HEADERS: [&str; 14] = [
    "Date",
    "Location",
    "Team ID",
    "Gross Sales",
    "Net Sales",
    "Order Count",
    "Average Order",
    "Labor Cost",
    "Labor Hours",
    "Labor %",
    "Tips",
    "Non-Cash",
    "Total Cash",
    "Calculated Cash",
];

const WEEKLY_HEADERS: [&str; 12] = [
    "Day",
    "Date",
    "Location",
    "Gross Sales",
    "Net Sales",
    "Orders",
    "Avg Order",
    "Non Cash",
    "Total Cash",
    "Tips",
    "Discounts",
    "Taxes",
];

const WEEKDAYS: [(Weekday, &str); 7] = [
    (Weekday::Mon, "Monday"),
    (Weekday::Tue, "Tuesday"),
    (Weekday::Wed, "Wednesday"),
    (Weekday::Thu, "Thursday"),
    (Weekday::Fri, "Friday"),
    (Weekday::Sat, "Saturday"),
    (Weekday::Sun, "Sunday"),
];

fn encoding_error(e: impl std::fmt::Display) -> AppError {
    AppError::encoding(format!("CSV encoding failed: {}", e))
}

/// One row per record, 14 fixed columns plus any custom columns
pub fn sales_to_csv(records: &[SalesRecord], options: &ExportOptions) -> AppResult<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    let mut headers: Vec<&str> = SALES_HEADERS.to_vec();
    headers.extend(options.custom_fields.iter().map(|f| f.header()));
    writer.write_record(&headers).map_err(encoding_error)?;

    for sale in records {
        // Recomputed from the raw figures, not read from the record
        let labor_percentage = if sale.labor.cost != 0.0 && sale.gross_sales != 0.0 {
            format!("{:.2}", sale.labor.cost / sale.gross_sales * 100.0)
        } else {
            "0".to_string()
        };

        let mut row = vec![
            sale.date.to_string(),
            sale.location.clone(),
            sale.team_id.clone().unwrap_or_default(),
            format!("{:.2}", sale.gross_sales),
            format!("{:.2}", sale.net_sales),
            sale.order_count.to_string(),
            format!("{:.2}", sale.order_average),
            format!("{:.2}", sale.labor.cost),
            sale.labor.hours.to_string(),
            labor_percentage,
            format!("{:.2}", sale.payment_breakdown.tips),
            format!("{:.2}", sale.payment_breakdown.non_cash),
            format!("{:.2}", sale.payment_breakdown.total_cash),
            format!("{:.2}", sale.payment_breakdown.calculated_cash),
        ];
        for field in &options.custom_fields {
            let value = field.extract(sale);
            // Zero renders empty in the custom columns
            row.push(if value != 0.0 {
                value.to_string()
            } else {
                String::new()
            });
        }
        writer.write_record(&row).map_err(encoding_error)?;
    }

    writer
        .into_inner()
        .map_err(|e| encoding_error(e.to_string()))
}

/// Seven weekday rows (empty when the day has no record) plus a TOTAL row
pub fn weekly_to_csv(weekly: &WeeklySales) -> AppResult<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(WEEKLY_HEADERS).map_err(encoding_error)?;

    for (weekday, day_name) in WEEKDAYS {
        let row = match weekly.daily_sales.iter().find(|s| s.date.weekday() == weekday) {
            Some(sale) => {
                let discount_total: f64 = sale.discounts.iter().map(|d| d.total).sum();
                let tax_total: f64 = sale.taxes.iter().map(|t| t.total).sum();
                vec![
                    day_name.to_string(),
                    sale.date.to_string(),
                    sale.location.clone(),
                    format!("{:.2}", sale.gross_sales),
                    format!("{:.2}", sale.net_sales),
                    sale.order_count.to_string(),
                    format!("{:.2}", sale.order_average),
                    format!("{:.2}", sale.payment_breakdown.non_cash),
                    format!("{:.2}", sale.payment_breakdown.total_cash),
                    format!("{:.2}", sale.payment_breakdown.tips),
                    format!("{:.2}", discount_total),
                    format!("{:.2}", tax_total),
                ]
            }
            None => {
                let mut row = vec![
                    day_name.to_string(),
                    String::new(),
                    weekly.location.clone(),
                ];
                row.extend(std::iter::repeat_n("0".to_string(), 9));
                row
            }
        };
        writer.write_record(&row).map_err(encoding_error)?;
    }

    let total_orders: i64 = weekly.daily_sales.iter().map(|s| s.order_count).sum();
    writer
        .write_record(&[
            "TOTAL".to_string(),
            format!(
                "{} - {}",
                weekly.week_start.format("%b %d"),
                weekly.week_end.format("%b %d")
            ),
            weekly.location.clone(),
            format!("{:.2}", weekly.totals.gross_total),
            format!("{:.2}", weekly.totals.net_sales),
            total_orders.to_string(),
            String::new(),
            format!("{:.2}", weekly.totals.non_cash),
            format!("{:.2}", weekly.totals.total_cash),
            format!("{:.2}", weekly.totals.tips),
            format!("{:.2}", weekly.totals.discount),
            format!("{:.2}", weekly.totals.tax_paid),
        ])
        .map_err(encoding_error)?;

    writer
        .into_inner()
        .map_err(|e| encoding_error(e.to_string()))
}
