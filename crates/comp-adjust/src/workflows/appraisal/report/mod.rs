mod export;
mod narrative;
pub mod views;

pub use export::{write_csv, write_csv_path};
pub use narrative::{adjustment_phrases, describe_comp, narrate, CompNarrative, NetDirection};
pub use views::{format_adjustment, format_currency, format_ppsf, AdjustmentRow, AdjustmentTable};

use super::domain::AdjustmentOutcome;
use serde::Serialize;

/// Everything a presentation layer needs to show one batch.
#[derive(Debug, Clone, Serialize)]
pub struct AdjustmentReport {
    pub table: AdjustmentTable,
    pub narrative: Vec<CompNarrative>,
}

impl AdjustmentReport {
    pub fn from_outcome(outcome: &AdjustmentOutcome) -> Self {
        Self {
            table: AdjustmentTable::from_outcome(outcome),
            narrative: narrate(outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::appraisal::domain::{
        AdjustedComp, Adjustment, ConditionRating, NormalizedComp,
    };

    fn adjusted(filename: &str, adjustments: Adjustment) -> AdjustedComp {
        let total_adjustment = adjustments.total();
        AdjustedComp {
            comp: NormalizedComp {
                filename: filename.to_string(),
                price_source: Some("SP".to_string()),
                sqft: 1900,
                price: 300_000,
                ppsf: 300_000.0 / 1900.0,
                beds: 3,
                full: 2,
                half: 1,
                acreage: 0.5,
                year: 2010,
                basement_total: 1000,
                finished: 400,
                finished_percent: 40.0,
                garage: 2,
            },
            condition: ConditionRating::Average,
            adjustments,
            total_adjustment,
            adjusted_price: 300_000.0 + total_adjustment,
        }
    }

    fn outcome() -> AdjustmentOutcome {
        AdjustmentOutcome {
            adjusted_comps: vec![
                adjusted(
                    "maple.pdf",
                    Adjustment {
                        beds: 3000.0,
                        garage: -2500.0,
                        basement: 450.0,
                        ..Adjustment::default()
                    },
                ),
                adjusted(
                    "oak.pdf",
                    Adjustment {
                        condition: -10000.0,
                        ..Adjustment::default()
                    },
                ),
                adjusted("elm.pdf", Adjustment::default()),
            ],
            avg_ppsf: 158,
            size_adj_rate: 40,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn narrative_lists_only_nonzero_adjustments() {
        let narrative = narrate(&outcome());
        assert_eq!(
            narrative[0].text,
            "Comp 1 (maple.pdf): Add $3,000 for bedroom count, Add $450 for finished basement %, \
Deduct $2,500 for garage space count. Net upward adjustment of $950."
        );
        assert_eq!(narrative[0].direction, NetDirection::Upward);
        assert_eq!(
            narrative[1].text,
            "Comp 2 (oak.pdf): Deduct $10,000 for condition. Net downward adjustment of $10,000."
        );
        assert_eq!(
            narrative[2].text,
            "Comp 3 (elm.pdf): No adjustments. No net adjustment of $0."
        );
    }

    #[test]
    fn table_rows_follow_column_layout() {
        let table = AdjustmentTable::from_outcome(&outcome());
        assert_eq!(table.columns.len(), 14);
        assert_eq!(table.rows.len(), 3);

        let cells = table.rows[0].cells();
        assert_eq!(cells.len(), table.columns.len());
        assert_eq!(cells[0], "maple.pdf");
        assert_eq!(cells[1], "$300,000");
        assert_eq!(cells[2], "$157.89");
        assert_eq!(cells[4], "+$3,000");
        assert_eq!(cells[10], "-$2,500");
        assert_eq!(cells[12], "+$950");
        assert_eq!(cells[13], "$300,950");
        assert_eq!(table.avg_ppsf, "$158");

        let text = table.render_text();
        assert!(text.starts_with("File"));
        assert!(text.contains("oak.pdf"));
        assert!(text.contains("Average sold PPSF: $158"));
    }

    #[test]
    fn csv_export_writes_one_record_per_comp() {
        let mut buffer = Vec::new();
        write_csv(&outcome(), &mut buffer).expect("csv writes");
        let text = String::from_utf8(buffer).expect("utf8");
        let mut lines = text.lines();
        let header = lines.next().expect("header row");
        assert!(header.starts_with("filename,price_source,condition,price,ppsf,size"));
        assert_eq!(lines.count(), 3);
        assert!(text.contains("oak.pdf,SP,Average,300000,157.89"));
    }
}
