use super::super::domain::{AdjustedComp, AdjustmentKind, AdjustmentOutcome};
use super::super::engine::round_half_up;
use serde::Serialize;

const LEADING_COLUMNS: [&str; 3] = ["File", "Price", "PPSF"];
const TRAILING_COLUMNS: [&str; 2] = ["Total Adj", "Adj Price"];

/// Grid headings: identity columns, one per adjustment kind, then totals.
fn table_columns() -> Vec<&'static str> {
    LEADING_COLUMNS
        .into_iter()
        .chain(AdjustmentKind::ordered().into_iter().map(AdjustmentKind::column))
        .chain(TRAILING_COLUMNS)
        .collect()
}

/// Group an unsigned whole-dollar figure with thousands separators.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn whole_dollars(value: f64) -> i64 {
    round_half_up(value) as i64
}

/// `+$5,000` / `-$1,200`, rounded to whole dollars. Zero renders as `+$0`.
pub fn format_adjustment(value: f64) -> String {
    let dollars = whole_dollars(value);
    let sign = if dollars >= 0 { '+' } else { '-' };
    format!("{sign}${}", group_thousands(dollars.unsigned_abs()))
}

/// `$300,000`; negative amounts keep a leading minus.
pub fn format_currency(value: f64) -> String {
    let dollars = whole_dollars(value);
    let sign = if dollars < 0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(dollars.unsigned_abs()))
}

pub fn format_ppsf(value: f64) -> String {
    format!("${value:.2}")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustmentRow {
    pub filename: String,
    pub price: String,
    pub ppsf: String,
    /// One cell per adjustment, in [`AdjustmentKind::ordered`] order.
    pub adjustments: Vec<String>,
    pub total_adjustment: String,
    pub adjusted_price: String,
}

impl AdjustmentRow {
    pub fn from_comp(adjusted: &AdjustedComp) -> Self {
        Self {
            filename: adjusted.comp.filename.clone(),
            price: format_currency(adjusted.comp.price as f64),
            ppsf: format_ppsf(adjusted.comp.ppsf),
            adjustments: adjusted
                .adjustments
                .entries()
                .map(|(_, value)| format_adjustment(value))
                .collect(),
            total_adjustment: format_adjustment(adjusted.total_adjustment),
            adjusted_price: format_currency(adjusted.adjusted_price),
        }
    }

    /// Cells in table column order.
    pub fn cells(&self) -> Vec<&str> {
        let mut cells = Vec::with_capacity(
            LEADING_COLUMNS.len() + self.adjustments.len() + TRAILING_COLUMNS.len(),
        );
        cells.push(self.filename.as_str());
        cells.push(self.price.as_str());
        cells.push(self.ppsf.as_str());
        cells.extend(self.adjustments.iter().map(String::as_str));
        cells.push(self.total_adjustment.as_str());
        cells.push(self.adjusted_price.as_str());
        cells
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustmentTable {
    pub columns: Vec<&'static str>,
    pub rows: Vec<AdjustmentRow>,
    pub avg_ppsf: String,
    pub size_adj_rate: String,
}

impl AdjustmentTable {
    pub fn from_outcome(outcome: &AdjustmentOutcome) -> Self {
        Self {
            columns: table_columns(),
            rows: outcome
                .adjusted_comps
                .iter()
                .map(AdjustmentRow::from_comp)
                .collect(),
            avg_ppsf: format_currency(outcome.avg_ppsf as f64),
            size_adj_rate: format_currency(outcome.size_adj_rate as f64),
        }
    }

    /// Plain-text grid with columns padded to their widest cell.
    pub fn render_text(&self) -> String {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.len()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row.cells()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let render_line = |cells: &[&str]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:<w$}", w = *width))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut lines = vec![render_line(&self.columns)];
        lines.push(
            widths
                .iter()
                .map(|width| "-".repeat(*width))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        for row in &self.rows {
            lines.push(render_line(&row.cells()));
        }
        lines.push(String::new());
        lines.push(format!("Average sold PPSF: {}", self.avg_ppsf));
        lines.push(format!("Size adjustment rate: {} per sq ft", self.size_adj_rate));
        lines.join("\n")
    }
}
