use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Price-source tag marking an actual closed sale.
pub const SOLD_PRICE_SOURCE: &str = "SP";

/// Ordinal condition scale shared by the subject and every comp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ConditionRating {
    Poor,
    Fair,
    #[default]
    Average,
    Good,
    Excellent,
}

impl ConditionRating {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Poor,
            Self::Fair,
            Self::Average,
            Self::Good,
            Self::Excellent,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Fair => "Fair",
            Self::Average => "Average",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }

    pub const fn score(self) -> u8 {
        match self {
            Self::Poor => 0,
            Self::Fair => 1,
            Self::Average => 2,
            Self::Good => 3,
            Self::Excellent => 4,
        }
    }
}

impl TryFrom<u8> for ConditionRating {
    type Error = InvalidConditionRating;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ordered()
            .into_iter()
            .find(|rating| rating.score() == value)
            .ok_or(InvalidConditionRating(value))
    }
}

impl From<ConditionRating> for u8 {
    fn from(value: ConditionRating) -> Self {
        value.score()
    }
}

impl fmt::Display for ConditionRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("condition rating must be between 0 (Poor) and 4 (Excellent), got {0}")]
pub struct InvalidConditionRating(pub u8);

/// The property being appraised, as keyed in by the appraiser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectProperty {
    pub sqft: u32,
    pub year: i32,
    pub beds: u32,
    pub full: u32,
    pub half: u32,
    pub acreage: f64,
    /// Finished share of the basement, 0-100.
    pub finish: f64,
    pub garage: u32,
    pub condition: ConditionRating,
}

/// Comparable as returned by the extraction service. Every numeric field is
/// whatever the document scraper produced: a number, a string, or nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawComp {
    pub filename: String,
    #[serde(default)]
    pub square_footage: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub price_source: Option<String>,
    #[serde(default)]
    pub bedrooms: Option<Value>,
    #[serde(default)]
    pub bathrooms_full: Option<Value>,
    #[serde(default)]
    pub bathrooms_half: Option<Value>,
    #[serde(default)]
    pub acreage: Option<Value>,
    #[serde(default)]
    pub year_built: Option<Value>,
    #[serde(default)]
    pub basement_size: Option<Value>,
    #[serde(default)]
    pub finished_basement: Option<Value>,
    #[serde(default)]
    pub garage_spaces: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedComp {
    pub filename: String,
    pub price_source: Option<String>,
    pub sqft: i64,
    pub price: i64,
    pub ppsf: f64,
    pub beds: i64,
    pub full: i64,
    pub half: i64,
    pub acreage: f64,
    pub year: i64,
    pub basement_total: i64,
    pub finished: i64,
    pub finished_percent: f64,
    pub garage: i64,
}

impl NormalizedComp {
    pub fn is_sold(&self) -> bool {
        self.price_source.as_deref() == Some(SOLD_PRICE_SOURCE)
    }
}

/// Dollar adjustments for each compared feature. Positive values mean the
/// subject is superior and the comp price is adjusted upward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub size: f64,
    pub beds: f64,
    pub full: f64,
    pub half: f64,
    pub basement: f64,
    pub acreage: f64,
    pub age: f64,
    pub garage: f64,
    pub condition: f64,
}

/// Feature keys in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    Size,
    Beds,
    Full,
    Half,
    Basement,
    Acreage,
    Age,
    Garage,
    Condition,
}

impl AdjustmentKind {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::Size,
            Self::Beds,
            Self::Full,
            Self::Half,
            Self::Basement,
            Self::Acreage,
            Self::Age,
            Self::Garage,
            Self::Condition,
        ]
    }

    /// Short column heading.
    pub const fn column(self) -> &'static str {
        match self {
            Self::Size => "Size",
            Self::Beds => "Bed",
            Self::Full => "Full",
            Self::Half => "Half",
            Self::Basement => "Basement",
            Self::Acreage => "Acreage",
            Self::Age => "Age",
            Self::Garage => "Garage",
            Self::Condition => "Condition",
        }
    }

    /// Phrase used in narrative sentences ("Add $3,000 for bedroom count").
    pub const fn description(self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::Beds => "bedroom count",
            Self::Full => "full bath count",
            Self::Half => "half bath count",
            Self::Basement => "finished basement %",
            Self::Acreage => "acreage",
            Self::Age => "age difference",
            Self::Garage => "garage space count",
            Self::Condition => "condition",
        }
    }
}

impl Adjustment {
    pub fn get(&self, kind: AdjustmentKind) -> f64 {
        match kind {
            AdjustmentKind::Size => self.size,
            AdjustmentKind::Beds => self.beds,
            AdjustmentKind::Full => self.full,
            AdjustmentKind::Half => self.half,
            AdjustmentKind::Basement => self.basement,
            AdjustmentKind::Acreage => self.acreage,
            AdjustmentKind::Age => self.age,
            AdjustmentKind::Garage => self.garage,
            AdjustmentKind::Condition => self.condition,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (AdjustmentKind, f64)> + '_ {
        AdjustmentKind::ordered()
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
    }

    pub fn total(&self) -> f64 {
        self.entries().map(|(_, value)| value).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustedComp {
    #[serde(flatten)]
    pub comp: NormalizedComp,
    pub condition: ConditionRating,
    pub adjustments: Adjustment,
    pub total_adjustment: f64,
    pub adjusted_price: f64,
}

/// Which numeric field fell back to zero and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataQualityIssue {
    Missing,
    Unparseable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataQualityWarning {
    pub filename: String,
    pub field: &'static str,
    pub issue: DataQualityIssue,
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.issue {
            DataQualityIssue::Missing => "missing",
            DataQualityIssue::Unparseable => "not numeric",
        };
        write!(f, "{}: {} {}, treated as 0", self.filename, self.field, reason)
    }
}

/// Engine result for one batch of comps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustmentOutcome {
    pub adjusted_comps: Vec<AdjustedComp>,
    pub avg_ppsf: i64,
    pub size_adj_rate: i64,
    pub warnings: Vec<DataQualityWarning>,
}
