use super::super::domain::{AdjustedComp, AdjustmentOutcome};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
struct GridRecord<'a> {
    filename: &'a str,
    price_source: &'a str,
    condition: &'static str,
    price: i64,
    ppsf: f64,
    size: f64,
    beds: f64,
    full: f64,
    half: f64,
    basement: f64,
    acreage: f64,
    age: f64,
    garage: f64,
    condition_adjustment: f64,
    total_adjustment: f64,
    adjusted_price: f64,
}

impl<'a> GridRecord<'a> {
    fn from_comp(adjusted: &'a AdjustedComp) -> Self {
        let adjustments = &adjusted.adjustments;
        Self {
            filename: &adjusted.comp.filename,
            price_source: adjusted.comp.price_source.as_deref().unwrap_or(""),
            condition: adjusted.condition.label(),
            price: adjusted.comp.price,
            ppsf: (adjusted.comp.ppsf * 100.0).round() / 100.0,
            size: adjustments.size,
            beds: adjustments.beds,
            full: adjustments.full,
            half: adjustments.half,
            basement: adjustments.basement,
            acreage: adjustments.acreage,
            age: adjustments.age,
            garage: adjustments.garage,
            condition_adjustment: adjustments.condition,
            total_adjustment: adjusted.total_adjustment,
            adjusted_price: adjusted.adjusted_price,
        }
    }
}

/// Write the adjustment grid as CSV with raw numeric cells.
pub fn write_csv<W: Write>(outcome: &AdjustmentOutcome, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for adjusted in &outcome.adjusted_comps {
        csv_writer.serialize(GridRecord::from_comp(adjusted))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_csv_path<P: AsRef<Path>>(
    outcome: &AdjustmentOutcome,
    path: P,
) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_csv(outcome, file)
}
