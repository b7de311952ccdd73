use chrono::NaiveDate;
use comp_adjust::workflows::appraisal::{AdjustmentOutcome, AdjustmentReport, ConditionRating};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Adjustment outcome plus its presentation, shared by the HTTP response and
/// `adjust --json`.
#[derive(Debug, Serialize)]
pub(crate) struct AdjustmentResponse {
    pub(crate) as_of: NaiveDate,
    #[serde(flatten)]
    pub(crate) outcome: AdjustmentOutcome,
    #[serde(flatten)]
    pub(crate) report: AdjustmentReport,
}

impl AdjustmentResponse {
    pub(crate) fn new(as_of: NaiveDate, outcome: AdjustmentOutcome) -> Self {
        let report = AdjustmentReport::from_outcome(&outcome);
        Self {
            as_of,
            outcome,
            report,
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_condition(raw: &str) -> Result<ConditionRating, String> {
    let value: u8 = raw
        .trim()
        .parse()
        .map_err(|_| format!("condition rating must be an integer from 0 to 4, got '{raw}'"))?;
    ConditionRating::try_from(value).map_err(|err| err.to_string())
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
