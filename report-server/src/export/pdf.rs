//! PDF encoders
//!
//! A small text-and-table layout engine over `lopdf`. A4 portrait, two
//! built-in fonts, top-down cursor with automatic page breaks. The table
//! layout sits behind [`TableRenderer`] so the report encoders never
//! depend on how cells are placed.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use shared::models::{KpiMetrics, PerformanceInsight, SalesRecord, WeeklySales};
use shared::{AppError, AppResult};

use super::ExportOptions;

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN_LEFT: f32 = 50.0;
const MARGIN_BOTTOM: f32 = 60.0;
const TOP: f32 = 792.0;
const USABLE_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN_LEFT;
/// x offset of the right-hand column in two-column lines
const SECOND_COLUMN_X: f32 = 340.0;
/// Rough average glyph width as a fraction of the font size
const GLYPH_WIDTH_RATIO: f32 = 0.5;

/// Table layout seam, kept separate so a different backend can slot in
pub trait TableRenderer {
    fn render_table(&mut self, headers: &[&str], rows: &[Vec<String>]);
}

/// Page-oriented text layout over a growing `lopdf` document
pub struct PdfBuilder {
    operations: Vec<Operation>,
    finished_pages: Vec<Vec<Operation>>,
    cursor: f32,
}

impl PdfBuilder {
    pub fn new() -> Self {
        Self {
            operations: Vec::new(),
            finished_pages: Vec::new(),
            cursor: TOP,
        }
    }

    fn text_at(&mut self, font: &str, size: f32, x: f32, y: f32, text: &str) {
        self.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.into(), size.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ]);
    }

    fn ensure_room(&mut self, needed: f32) {
        if self.cursor - needed < MARGIN_BOTTOM {
            self.new_page();
        }
    }

    pub fn new_page(&mut self) {
        self.finished_pages
            .push(std::mem::take(&mut self.operations));
        self.cursor = TOP;
    }

    /// Bold heading line
    pub fn heading(&mut self, size: f32, text: &str) {
        self.ensure_room(size + 8.0);
        self.cursor -= size + 8.0;
        self.text_at("F2", size, MARGIN_LEFT, self.cursor, text);
    }

    /// Regular text line
    pub fn line(&mut self, size: f32, text: &str) {
        self.ensure_room(size + 4.0);
        self.cursor -= size + 4.0;
        self.text_at("F1", size, MARGIN_LEFT, self.cursor, text);
    }

    /// One line with a left and a right column
    pub fn line_pair(&mut self, size: f32, left: &str, right: &str) {
        self.ensure_room(size + 4.0);
        self.cursor -= size + 4.0;
        self.text_at("F1", size, MARGIN_LEFT, self.cursor, left);
        self.text_at("F1", size, SECOND_COLUMN_X, self.cursor, right);
    }

    /// Indented text line
    pub fn indented_line(&mut self, size: f32, indent: f32, text: &str) {
        self.ensure_room(size + 4.0);
        self.cursor -= size + 4.0;
        self.text_at("F1", size, MARGIN_LEFT + indent, self.cursor, text);
    }

    pub fn space(&mut self, points: f32) {
        self.cursor -= points;
    }

    /// Assemble the page tree and serialize the document
    pub fn finish(mut self) -> AppResult<Vec<u8>> {
        self.finished_pages
            .push(std::mem::take(&mut self.operations));

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular_id,
                "F2" => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for operations in self.finished_pages {
            let content = Content { operations };
            let encoded = content
                .encode()
                .map_err(|e| AppError::encoding(format!("PDF encoding failed: {}", e)))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    PAGE_WIDTH.into(),
                    PAGE_HEIGHT.into(),
                ],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| AppError::encoding(format!("PDF serialization failed: {}", e)))?;
        Ok(bytes)
    }
}

impl Default for PdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer for PdfBuilder {
    fn render_table(&mut self, headers: &[&str], rows: &[Vec<String>]) {
        if headers.is_empty() {
            return;
        }
        let column_width = USABLE_WIDTH / headers.len() as f32;
        let header_size = 9.0;
        let cell_size = 8.0;
        let max_chars = (column_width / (cell_size * GLYPH_WIDTH_RATIO)) as usize;

        self.ensure_room(header_size + 6.0);
        self.cursor -= header_size + 6.0;
        for (index, header) in headers.iter().enumerate() {
            let x = MARGIN_LEFT + index as f32 * column_width;
            self.text_at("F2", header_size, x, self.cursor, &truncate(header, max_chars));
        }

        for row in rows {
            self.ensure_room(cell_size + 5.0);
            self.cursor -= cell_size + 5.0;
            for (index, cell) in row.iter().enumerate().take(headers.len()) {
                let x = MARGIN_LEFT + index as f32 * column_width;
                self.text_at("F1", cell_size, x, self.cursor, &truncate(cell, max_chars));
            }
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(2)).collect();
    kept + ".."
}

/// Greedy word wrap by character count
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + word.chars().count() + 1 > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn format_date_long(date: chrono::NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Sales data report: summary block plus the full record table
pub fn sales_to_pdf(records: &[SalesRecord], options: &ExportOptions) -> AppResult<Vec<u8>> {
    let mut pdf = PdfBuilder::new();
    pdf.heading(18.0, "Sales Data Report");

    if let Some(range) = &options.date_range {
        pdf.line(
            12.0,
            &format!(
                "Period: {} - {}",
                format_date_long(range.start),
                format_date_long(range.end)
            ),
        );
    }

    let total_sales: f64 = records.iter().map(|r| r.gross_sales).sum();
    let total_orders: i64 = records.iter().map(|r| r.order_count).sum();
    let average_order = if total_orders > 0 {
        total_sales / total_orders as f64
    } else {
        0.0
    };

    pdf.space(8.0);
    pdf.line(11.0, &format!("Total Records: {}", records.len()));
    pdf.line(11.0, &format!("Total Gross Sales: ${:.2}", total_sales));
    pdf.line(11.0, &format!("Total Orders: {}", total_orders));
    pdf.line(11.0, &format!("Average Order Value: ${:.2}", average_order));
    pdf.space(12.0);

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|sale| {
            vec![
                sale.date.to_string(),
                sale.location.clone(),
                format!("${:.2}", sale.gross_sales),
                format!("${:.2}", sale.net_sales),
                sale.order_count.to_string(),
                format!("${:.2}", sale.order_average),
            ]
        })
        .collect();
    pdf.render_table(
        &["Date", "Location", "Gross Sales", "Net Sales", "Orders", "Avg Order"],
        &rows,
    );

    pdf.finish()
}

/// Weekly report: totals block plus a Monday-to-Sunday breakdown table
pub fn weekly_to_pdf(weekly: &WeeklySales) -> AppResult<Vec<u8>> {
    use chrono::{Datelike, Weekday};

    let mut pdf = PdfBuilder::new();
    pdf.heading(20.0, "Weekly Sales Report");
    pdf.line(
        12.0,
        &format!(
            "Week: {} - {}",
            weekly.week_start.format("%b %d"),
            format_date_long(weekly.week_end)
        ),
    );
    pdf.line(12.0, &format!("Location: {}", weekly.location));

    pdf.space(10.0);
    pdf.heading(14.0, "Weekly Summary");
    pdf.line_pair(
        11.0,
        &format!("Gross Sales: ${:.2}", weekly.totals.gross_total),
        &format!("Tips: ${:.2}", weekly.totals.tips),
    );
    pdf.line_pair(
        11.0,
        &format!("Net Sales: ${:.2}", weekly.totals.net_sales),
        &format!("Discounts: ${:.2}", weekly.totals.discount),
    );
    pdf.line_pair(
        11.0,
        &format!("Total Cash: ${:.2}", weekly.totals.total_cash),
        &format!("Taxes: ${:.2}", weekly.totals.tax_paid),
    );
    pdf.line(11.0, &format!("Non-Cash: ${:.2}", weekly.totals.non_cash));
    pdf.space(14.0);

    let weekdays: [(Weekday, &str); 7] = [
        (Weekday::Mon, "Monday"),
        (Weekday::Tue, "Tuesday"),
        (Weekday::Wed, "Wednesday"),
        (Weekday::Thu, "Thursday"),
        (Weekday::Fri, "Friday"),
        (Weekday::Sat, "Saturday"),
        (Weekday::Sun, "Sunday"),
    ];
    let rows: Vec<Vec<String>> = weekdays
        .iter()
        .map(|(weekday, day_name)| {
            match weekly
                .daily_sales
                .iter()
                .find(|s| s.date.weekday() == *weekday)
            {
                Some(sale) => vec![
                    day_name.to_string(),
                    sale.date.format("%b %d").to_string(),
                    format!("${:.2}", sale.gross_sales),
                    format!("${:.2}", sale.net_sales),
                    sale.order_count.to_string(),
                ],
                None => vec![
                    day_name.to_string(),
                    "-".to_string(),
                    "$0.00".to_string(),
                    "$0.00".to_string(),
                    "0".to_string(),
                ],
            }
        })
        .collect();
    pdf.render_table(&["Day", "Date", "Gross Sales", "Net Sales", "Orders"], &rows);

    pdf.finish()
}

/// Analytics report: KPI block with period changes, then the insights
pub fn analytics_to_pdf(
    kpis: &KpiMetrics,
    insights: &[PerformanceInsight],
    options: &ExportOptions,
) -> AppResult<Vec<u8>> {
    fn signed(change: f64) -> String {
        format!("Change: {}{:.1}%", if change >= 0.0 { "+" } else { "" }, change)
    }

    let mut pdf = PdfBuilder::new();
    pdf.heading(20.0, "Analytics Report");

    if let Some(range) = &options.date_range {
        pdf.line(
            12.0,
            &format!(
                "Period: {} - {}",
                format_date_long(range.start),
                format_date_long(range.end)
            ),
        );
    }

    pdf.space(8.0);
    pdf.heading(16.0, "Key Performance Indicators");
    let comparison = &kpis.period_comparison;
    pdf.line_pair(
        11.0,
        &format!("Gross Sales: ${:.2}", kpis.gross_sales),
        &signed(comparison.gross_sales_change),
    );
    pdf.line_pair(
        11.0,
        &format!("Net Sales: ${:.2}", kpis.net_sales),
        &signed(comparison.net_sales_change),
    );
    pdf.line_pair(
        11.0,
        &format!("Order Count: {}", kpis.order_count),
        &signed(comparison.order_count_change),
    );
    pdf.line_pair(
        11.0,
        &format!("Average Order Value: ${:.2}", kpis.average_order_value),
        &signed(comparison.average_order_value_change),
    );
    pdf.line(
        11.0,
        &format!("Labor Cost %: {:.1}%", kpis.labor_cost_percentage),
    );

    if options.include_insights && !insights.is_empty() {
        pdf.space(16.0);
        pdf.heading(16.0, "Performance Insights");
        for (index, insight) in insights.iter().enumerate() {
            pdf.line(10.0, &format!("{}. {}", index + 1, insight.title));
            for wrapped in wrap(&insight.description, 95) {
                pdf.indented_line(10.0, 5.0, &wrapped);
            }
            pdf.space(4.0);
        }
    }

    pdf.finish()
}
