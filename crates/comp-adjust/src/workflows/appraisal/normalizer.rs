use super::coerce::{float_value, int_value};
use super::domain::{DataQualityIssue, DataQualityWarning, NormalizedComp, RawComp};
use serde_json::Value;

struct FieldReader<'a> {
    filename: &'a str,
    warnings: Vec<DataQualityWarning>,
}

impl<'a> FieldReader<'a> {
    fn int(&mut self, field: &'static str, value: Option<&Value>) -> i64 {
        int_value(value).unwrap_or_else(|issue| self.record(field, issue, 0))
    }

    fn float(&mut self, field: &'static str, value: Option<&Value>) -> f64 {
        float_value(value).unwrap_or_else(|issue| self.record(field, issue, 0.0))
    }

    fn record<T>(&mut self, field: &'static str, issue: DataQualityIssue, fallback: T) -> T {
        self.warnings.push(DataQualityWarning {
            filename: self.filename.to_string(),
            field,
            issue,
        });
        fallback
    }
}

/// Coerce one extracted record into numbers, reporting every field that fell
/// back to zero.
pub fn normalize_comp(raw: &RawComp) -> (NormalizedComp, Vec<DataQualityWarning>) {
    let mut reader = FieldReader {
        filename: &raw.filename,
        warnings: Vec::new(),
    };

    let sqft = reader.int("square_footage", raw.square_footage.as_ref());
    let price = reader.int("price", raw.price.as_ref());
    let beds = reader.int("bedrooms", raw.bedrooms.as_ref());
    let full = reader.int("bathrooms_full", raw.bathrooms_full.as_ref());
    let half = reader.int("bathrooms_half", raw.bathrooms_half.as_ref());
    let acreage = reader.float("acreage", raw.acreage.as_ref());
    let year = reader.int("year_built", raw.year_built.as_ref());
    let basement_total = reader.int("basement_size", raw.basement_size.as_ref());
    let finished = reader.int("finished_basement", raw.finished_basement.as_ref());
    let garage = reader.int("garage_spaces", raw.garage_spaces.as_ref());

    let ppsf = if sqft != 0 {
        price as f64 / sqft as f64
    } else {
        0.0
    };
    let finished_percent = if basement_total > 0 {
        finished as f64 / basement_total as f64 * 100.0
    } else {
        0.0
    };

    let comp = NormalizedComp {
        filename: raw.filename.clone(),
        price_source: raw.price_source.clone(),
        sqft,
        price,
        ppsf,
        beds,
        full,
        half,
        acreage,
        year,
        basement_total,
        finished,
        finished_percent,
        garage,
    };

    (comp, reader.warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(filename: &str) -> RawComp {
        RawComp {
            filename: filename.to_string(),
            ..RawComp::default()
        }
    }

    #[test]
    fn square_footage_commas_are_stripped() {
        let comp = RawComp {
            square_footage: Some(json!("1,234")),
            price: Some(json!(246_800)),
            ..raw("comp-1.pdf")
        };

        let (normalized, _) = normalize_comp(&comp);
        assert_eq!(normalized.sqft, 1234);
        assert_eq!(normalized.ppsf, 200.0);
    }

    #[test]
    fn zero_sqft_and_empty_basement_yield_zero_ratios() {
        let comp = RawComp {
            price: Some(json!("250000")),
            basement_size: Some(json!("0")),
            finished_basement: Some(json!("400")),
            ..raw("comp-2.pdf")
        };

        let (normalized, _) = normalize_comp(&comp);
        assert_eq!(normalized.sqft, 0);
        assert_eq!(normalized.ppsf, 0.0);
        assert_eq!(normalized.finished_percent, 0.0);
        assert!(!normalized.ppsf.is_nan());
    }

    #[test]
    fn finished_percent_uses_basement_share() {
        let comp = RawComp {
            basement_size: Some(json!("1,000")),
            finished_basement: Some(json!("400")),
            ..raw("comp-3.pdf")
        };

        let (normalized, _) = normalize_comp(&comp);
        assert_eq!(normalized.basement_total, 1000);
        assert_eq!(normalized.finished_percent, 40.0);
    }

    #[test]
    fn defaulted_fields_are_reported() {
        let comp = RawComp {
            square_footage: Some(json!("1900")),
            price: Some(json!(300_000)),
            price_source: Some("SP".to_string()),
            bedrooms: Some(json!("three")),
            bathrooms_full: Some(json!(2)),
            bathrooms_half: Some(json!(1)),
            acreage: Some(json!("0.5")),
            year_built: Some(json!("2010")),
            basement_size: None,
            finished_basement: None,
            garage_spaces: Some(json!("2")),
            ..raw("comp-4.pdf")
        };

        let (normalized, warnings) = normalize_comp(&comp);
        assert_eq!(normalized.beds, 0);
        assert!(normalized.is_sold());

        let fields: Vec<_> = warnings.iter().map(|w| (w.field, w.issue)).collect();
        assert_eq!(
            fields,
            vec![
                ("bedrooms", DataQualityIssue::Unparseable),
                ("basement_size", DataQualityIssue::Missing),
                ("finished_basement", DataQualityIssue::Missing),
            ]
        );
        assert!(warnings.iter().all(|w| w.filename == "comp-4.pdf"));
    }
}
