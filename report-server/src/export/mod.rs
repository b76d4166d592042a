//! Export Encoders
//!
//! Turn records and analytics into downloadable CSV, PDF or JSON bytes.
//! Encoders are pure functions over their inputs; data access stays in
//! the callers. Excel requests are served as CSV and marked degraded in
//! the result rather than failing.

mod csv_format;
mod json_format;
mod pdf;

pub use csv_format::{sales_to_csv, weekly_to_csv};
pub use json_format::{analytics_to_json, sales_to_json};
pub use pdf::{PdfBuilder, TableRenderer, analytics_to_pdf, sales_to_pdf, weekly_to_pdf};

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use shared::models::{KpiMetrics, PerformanceInsight, SalesRecord, WeeklySales};
use shared::{AppError, AppResult, DateRange};

const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8";
const PDF_CONTENT_TYPE: &str = "application/pdf";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Requested output encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Excel,
    Pdf,
    Json,
}

impl ExportFormat {
    /// File extension used in generated filenames. Excel keeps its own
    /// extension even though the payload degrades to CSV.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "excel",
            Self::Pdf => "pdf",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(Self::Csv),
            "excel" => Ok(Self::Excel),
            "pdf" => Ok(Self::Pdf),
            "json" => Ok(Self::Json),
            other => Err(AppError::unsupported_format(other)),
        }
    }
}

/// Extra per-record column a caller may append to the sales CSV
///
/// Closed set; unknown field names are rejected up front instead of
/// silently rendering empty columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomField {
    Voids,
    Refunds,
    Surcharges,
    Expenses,
}

impl CustomField {
    pub fn parse(name: &str) -> AppResult<Self> {
        match name {
            "voids" => Ok(Self::Voids),
            "refunds" => Ok(Self::Refunds),
            "surcharges" => Ok(Self::Surcharges),
            "expenses" => Ok(Self::Expenses),
            other => Err(AppError::unknown_export_field(other)),
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            Self::Voids => "Voids",
            Self::Refunds => "Refunds",
            Self::Surcharges => "Surcharges",
            Self::Expenses => "Expenses",
        }
    }

    pub fn extract(&self, record: &SalesRecord) -> f64 {
        match self {
            Self::Voids => record.voids,
            Self::Refunds => record.refunds,
            Self::Surcharges => record.surcharges,
            Self::Expenses => record.expenses,
        }
    }
}

/// Caller-supplied knobs for one export
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub include_insights: bool,
    pub include_raw_data: bool,
    pub date_range: Option<DateRange>,
    pub team_id: Option<String>,
    pub custom_fields: Vec<CustomField>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            include_insights: true,
            include_raw_data: false,
            date_range: None,
            team_id: None,
            custom_fields: Vec::new(),
        }
    }
}

/// Encoded export payload with its HTTP content type
#[derive(Debug, Clone)]
pub struct EncodedExport {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    /// True when the requested format was substituted with another
    pub degraded: bool,
    pub note: Option<String>,
}

impl EncodedExport {
    fn new(bytes: Vec<u8>, content_type: &'static str) -> Self {
        Self {
            bytes,
            content_type,
            degraded: false,
            note: None,
        }
    }

    fn degraded(bytes: Vec<u8>, content_type: &'static str, note: &str) -> Self {
        Self {
            bytes,
            content_type,
            degraded: true,
            note: Some(note.to_string()),
        }
    }
}

/// Encode raw sales records in the requested format
pub fn export_sales_data(
    records: &[SalesRecord],
    options: &ExportOptions,
) -> AppResult<EncodedExport> {
    match options.format {
        ExportFormat::Csv => Ok(EncodedExport::new(
            sales_to_csv(records, options)?,
            CSV_CONTENT_TYPE,
        )),
        ExportFormat::Excel => Ok(EncodedExport::degraded(
            sales_to_csv(records, options)?,
            CSV_CONTENT_TYPE,
            "Excel export is encoded as CSV",
        )),
        ExportFormat::Pdf => Ok(EncodedExport::new(
            sales_to_pdf(records, options)?,
            PDF_CONTENT_TYPE,
        )),
        ExportFormat::Json => Ok(EncodedExport::new(
            sales_to_json(records, options)?,
            JSON_CONTENT_TYPE,
        )),
    }
}

/// Encode a weekly rollup. Only CSV and PDF apply to the weekly layout.
pub fn export_weekly_report(
    weekly: &WeeklySales,
    options: &ExportOptions,
) -> AppResult<EncodedExport> {
    match options.format {
        ExportFormat::Csv => Ok(EncodedExport::new(
            weekly_to_csv(weekly)?,
            CSV_CONTENT_TYPE,
        )),
        ExportFormat::Pdf => Ok(EncodedExport::new(
            weekly_to_pdf(weekly)?,
            PDF_CONTENT_TYPE,
        )),
        other => Err(AppError::unsupported_format(other.to_string())),
    }
}

/// Encode a KPI + insights report. Only PDF and JSON apply.
pub fn export_analytics_report(
    kpis: &KpiMetrics,
    insights: &[PerformanceInsight],
    options: &ExportOptions,
) -> AppResult<EncodedExport> {
    match options.format {
        ExportFormat::Pdf => Ok(EncodedExport::new(
            analytics_to_pdf(kpis, insights, options)?,
            PDF_CONTENT_TYPE,
        )),
        ExportFormat::Json => Ok(EncodedExport::new(
            analytics_to_json(kpis, insights, options)?,
            JSON_CONTENT_TYPE,
        )),
        other => Err(AppError::unsupported_format(other.to_string())),
    }
}

/// `{kind}-{start}-to-{end}.{ext}`, or today's date when no range is given
pub fn generate_filename(kind: &str, format: ExportFormat, range: Option<&DateRange>) -> String {
    match range {
        Some(r) => format!("{}-{}-to-{}.{}", kind, r.start, r.end, format.extension()),
        None => format!(
            "{}-{}.{}",
            kind,
            Utc::now().date_naive(),
            format.extension()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        let err = "xml".parse::<ExportFormat>().unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::UnsupportedFormat);
    }

    #[test]
    fn test_custom_field_parsing_is_closed() {
        assert_eq!(CustomField::parse("voids").unwrap(), CustomField::Voids);
        let err = CustomField::parse("giftCards").unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::UnknownExportField);
    }

    #[test]
    fn test_excel_degrades_to_csv() {
        let options = ExportOptions {
            format: ExportFormat::Excel,
            ..Default::default()
        };
        let export = export_sales_data(&[], &options).unwrap();
        assert!(export.degraded);
        assert_eq!(export.content_type, CSV_CONTENT_TYPE);
        assert!(export.note.is_some());
    }

    #[test]
    fn test_csv_is_not_degraded() {
        let export = export_sales_data(&[], &ExportOptions::default()).unwrap();
        assert!(!export.degraded);
        assert!(export.note.is_none());
    }

    #[test]
    fn test_weekly_rejects_json() {
        let weekly = WeeklySales {
            location: "Store A".into(),
            week_start: chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            week_end: chrono::NaiveDate::from_ymd_opt(2024, 1, 21).unwrap(),
            daily_sales: vec![],
            totals: Default::default(),
        };
        let options = ExportOptions {
            format: ExportFormat::Json,
            ..Default::default()
        };
        assert!(export_weekly_report(&weekly, &options).is_err());
    }

    #[test]
    fn test_analytics_rejects_csv() {
        let options = ExportOptions {
            format: ExportFormat::Csv,
            ..Default::default()
        };
        let err = export_analytics_report(&Default::default(), &[], &options).unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::UnsupportedFormat);
    }

    #[test]
    fn test_filename_with_range() {
        let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();
        assert_eq!(
            generate_filename("sales-data", ExportFormat::Csv, Some(&range)),
            "sales-data-2024-01-01-to-2024-01-31.csv"
        );
    }

    #[test]
    fn test_filename_without_range_uses_today() {
        let name = generate_filename("analytics-report", ExportFormat::Json, None);
        assert!(name.starts_with("analytics-report-"));
        assert!(name.ends_with(".json"));
    }
}
