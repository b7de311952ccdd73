//! Sales-comparison adjustments: coerce extracted comps, derive the market
//! size rate from sold comps, and price every feature difference against the
//! subject.

pub mod coerce;
pub mod domain;
mod engine;
mod normalizer;
mod rates;
pub mod report;
mod service;

pub use domain::{
    AdjustedComp, Adjustment, AdjustmentKind, AdjustmentOutcome, ConditionRating,
    DataQualityIssue, DataQualityWarning, InvalidConditionRating, NormalizedComp, RawComp,
    SubjectProperty, SOLD_PRICE_SOURCE,
};
pub use engine::{
    compute_adjustments, validate_batch_size, AdjustmentEngine, AdjustmentError, MAX_COMPS,
    MIN_COMPS,
};
pub use normalizer::normalize_comp;
pub use rates::AdjustmentRates;
pub use report::AdjustmentReport;
pub use service::{AppraisalError, AppraisalWorkflow};
