use super::domain::{
    AdjustedComp, Adjustment, AdjustmentOutcome, ConditionRating, NormalizedComp, RawComp,
    SubjectProperty,
};
use super::normalizer::normalize_comp;
use super::rates::AdjustmentRates;
use tracing::{debug, warn};

pub const MIN_COMPS: usize = 1;
pub const MAX_COMPS: usize = 6;

const YEARS_PER_DECADE: f64 = 10.0;
/// Absorbs binary floating error so a 0.3-acre gap counts as three steps.
const STEP_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdjustmentError {
    #[error("between 1 and 6 comps are required, got {count}")]
    InputCount { count: usize },
    #[error("{conditions} condition rating(s) supplied for {comps} comp(s)")]
    ConditionCount { comps: usize, conditions: usize },
    #[error("no sold comps (price source SP) to derive a market price per square foot")]
    NoSoldComps,
}

pub fn validate_batch_size(count: usize) -> Result<(), AdjustmentError> {
    if (MIN_COMPS..=MAX_COMPS).contains(&count) {
        Ok(())
    } else {
        Err(AdjustmentError::InputCount { count })
    }
}

/// Rounds half-way cases toward positive infinity.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Applies the formula bank to a batch of comps.
#[derive(Debug, Clone, Default)]
pub struct AdjustmentEngine {
    rates: AdjustmentRates,
}

impl AdjustmentEngine {
    pub fn new(rates: AdjustmentRates) -> Self {
        Self { rates }
    }

    pub fn standard() -> Self {
        Self::new(AdjustmentRates::standard())
    }

    pub fn compute(
        &self,
        subject: &SubjectProperty,
        comps: &[RawComp],
        conditions: &[ConditionRating],
    ) -> Result<AdjustmentOutcome, AdjustmentError> {
        validate_batch_size(comps.len())?;
        if conditions.len() != comps.len() {
            return Err(AdjustmentError::ConditionCount {
                comps: comps.len(),
                conditions: conditions.len(),
            });
        }

        let mut normalized = Vec::with_capacity(comps.len());
        let mut warnings = Vec::new();
        for raw in comps {
            let (comp, comp_warnings) = normalize_comp(raw);
            for warning in &comp_warnings {
                warn!(%warning, "comp field defaulted to zero");
            }
            warnings.extend(comp_warnings);
            normalized.push(comp);
        }

        let (avg_ppsf, size_adj_rate) = self.market_rates(&normalized)?;

        let adjusted_comps = normalized
            .into_iter()
            .zip(conditions.iter().copied())
            .map(|(comp, condition)| {
                let adjustments = self.adjust(subject, &comp, condition, size_adj_rate);
                let total_adjustment = adjustments.total();
                let adjusted_price = comp.price as f64 + total_adjustment;
                debug!(
                    filename = %comp.filename,
                    total_adjustment,
                    adjusted_price,
                    "comp adjusted"
                );
                AdjustedComp {
                    comp,
                    condition,
                    adjustments,
                    total_adjustment,
                    adjusted_price,
                }
            })
            .collect();

        Ok(AdjustmentOutcome {
            adjusted_comps,
            avg_ppsf,
            size_adj_rate,
            warnings,
        })
    }

    /// Average sold price per square foot and the per-foot size rate it
    /// implies, both rounded to whole dollars.
    pub fn market_rates(&self, comps: &[NormalizedComp]) -> Result<(i64, i64), AdjustmentError> {
        let sold: Vec<f64> = comps
            .iter()
            .filter(|comp| comp.is_sold())
            .map(|comp| comp.ppsf)
            .collect();
        if sold.is_empty() {
            return Err(AdjustmentError::NoSoldComps);
        }

        let mean = sold.iter().sum::<f64>() / sold.len() as f64;
        let avg_ppsf = round_half_up(mean);
        let size_adj_rate = round_half_up(avg_ppsf * self.rates.size_rate_factor);
        Ok((avg_ppsf as i64, size_adj_rate as i64))
    }

    pub fn adjust(
        &self,
        subject: &SubjectProperty,
        comp: &NormalizedComp,
        comp_condition: ConditionRating,
        size_adj_rate: i64,
    ) -> Adjustment {
        let rates = &self.rates;

        // Extracted values span the full i64 range; difference them in f64.
        let sqft_diff = f64::from(subject.sqft) - comp.sqft as f64;
        let size = if sqft_diff.abs() <= rates.size_tolerance_sqft as f64 {
            0.0
        } else {
            sqft_diff * size_adj_rate as f64
        };

        let acreage_steps = if rates.acreage_step > 0.0 {
            ((subject.acreage - comp.acreage).abs() / rates.acreage_step + STEP_EPSILON).floor()
        } else {
            0.0
        };

        let year_diff = f64::from(subject.year) - comp.year as f64;
        let age = if year_diff.abs() > rates.age_threshold_years as f64 {
            let decades = (year_diff.abs() / YEARS_PER_DECADE).floor();
            decades * rates.per_age_decade * year_diff.signum()
        } else {
            0.0
        };

        let condition_diff =
            f64::from(subject.condition.score()) - f64::from(comp_condition.score());

        Adjustment {
            size,
            beds: count_diff(subject.beds, comp.beds) * rates.per_bedroom,
            full: count_diff(subject.full, comp.full) * rates.per_full_bath,
            half: count_diff(subject.half, comp.half) * rates.per_half_bath,
            basement: (subject.finish - comp.finished_percent) / 100.0
                * rates.full_basement_finish,
            acreage: acreage_steps * rates.per_acreage_step,
            age,
            garage: count_diff(subject.garage, comp.garage) * rates.per_garage_space,
            condition: condition_diff * rates.per_condition_grade,
        }
    }
}

fn count_diff(subject: u32, comp: i64) -> f64 {
    f64::from(subject) - comp as f64
}

/// Run the standard formula bank over one batch.
pub fn compute_adjustments(
    subject: &SubjectProperty,
    comps: &[RawComp],
    conditions: &[ConditionRating],
) -> Result<AdjustmentOutcome, AdjustmentError> {
    AdjustmentEngine::standard().compute(subject, comps, conditions)
}
