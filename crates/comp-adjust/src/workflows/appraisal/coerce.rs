//! Default-to-zero coercion for the loosely typed fields the extraction
//! service returns.
//!
//! Every numeric comp field goes through [`int_value`] or [`float_value`].
//! Callers substitute zero for an `Err` and keep the issue as a
//! [`DataQualityIssue`] so the fallback is reported instead of hidden.

use super::domain::DataQualityIssue;
use serde_json::Value;

/// Parse an integer the way a form field would be read: numbers truncate,
/// strings lose thousands separators and keep their leading integer prefix.
pub fn int_value(value: Option<&Value>) -> Result<i64, DataQualityIssue> {
    match value {
        None | Some(Value::Null) => Err(DataQualityIssue::Missing),
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|v| v.is_finite()).map(truncate))
            .ok_or(DataQualityIssue::Unparseable),
        Some(Value::String(raw)) => {
            let cleaned = clean(raw);
            if cleaned.is_empty() {
                return Err(DataQualityIssue::Missing);
            }
            leading_number(&cleaned, false)
                .and_then(|prefix| prefix.parse::<i64>().ok())
                .ok_or(DataQualityIssue::Unparseable)
        }
        Some(_) => Err(DataQualityIssue::Unparseable),
    }
}

/// Parse a decimal; same rules as [`int_value`] but keeps the fraction.
pub fn float_value(value: Option<&Value>) -> Result<f64, DataQualityIssue> {
    match value {
        None | Some(Value::Null) => Err(DataQualityIssue::Missing),
        Some(Value::Number(number)) => number
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or(DataQualityIssue::Unparseable),
        Some(Value::String(raw)) => {
            let cleaned = clean(raw);
            if cleaned.is_empty() {
                return Err(DataQualityIssue::Missing);
            }
            leading_number(&cleaned, true)
                .and_then(|prefix| prefix.parse::<f64>().ok())
                .ok_or(DataQualityIssue::Unparseable)
        }
        Some(_) => Err(DataQualityIssue::Unparseable),
    }
}

fn truncate(value: f64) -> i64 {
    value.trunc().clamp(i64::MIN as f64, i64::MAX as f64) as i64
}

fn clean(raw: &str) -> String {
    raw.trim().chars().filter(|c| *c != ',').collect()
}

/// Longest prefix that reads as a number, or `None` when it holds no digit.
fn leading_number(text: &str, allow_fraction: bool) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let mut digits = 0;
    let mut seen_dot = false;
    while let Some(&byte) = bytes.get(end) {
        match byte {
            b'0'..=b'9' => digits += 1,
            b'.' if allow_fraction && !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if digits == 0 {
        return None;
    }
    Some(text[..end].trim_end_matches('.'))
}
