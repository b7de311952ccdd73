use serde::{Deserialize, Serialize};

/// Dollar rates behind each adjustment. The defaults are the office's
/// standard formula bank; nothing is fitted from the data except the
/// size rate, which follows the sold comps' price per square foot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentRates {
    /// Share of the average sold PPSF charged per square foot of difference.
    pub size_rate_factor: f64,
    /// Size gaps at or below this many square feet are immaterial.
    pub size_tolerance_sqft: i64,
    pub per_bedroom: f64,
    pub per_full_bath: f64,
    pub per_half_bath: f64,
    /// Value of a fully finished basement versus an unfinished one.
    pub full_basement_finish: f64,
    /// Charged per whole step of lot-size difference in either direction.
    /// Surplus and deficit acreage are both deducted from comparability, so
    /// this adjustment is never negative.
    pub per_acreage_step: f64,
    pub acreage_step: f64,
    /// Charged per whole decade once the age gap exceeds the threshold.
    pub per_age_decade: f64,
    pub age_threshold_years: i64,
    pub per_garage_space: f64,
    pub per_condition_grade: f64,
}

impl AdjustmentRates {
    pub fn standard() -> Self {
        Self {
            size_rate_factor: 0.25,
            size_tolerance_sqft: 100,
            per_bedroom: 3000.0,
            per_full_bath: 3000.0,
            per_half_bath: 1500.0,
            full_basement_finish: 4500.0,
            per_acreage_step: 1000.0,
            acreage_step: 0.1,
            per_age_decade: 1000.0,
            age_threshold_years: 10,
            per_garage_space: 2500.0,
            per_condition_grade: 10000.0,
        }
    }
}

impl Default for AdjustmentRates {
    fn default() -> Self {
        Self::standard()
    }
}
