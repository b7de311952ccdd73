use super::super::domain::{AdjustedComp, AdjustmentOutcome};
use super::views::format_currency;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NetDirection {
    Upward,
    Downward,
    None,
}

impl NetDirection {
    pub fn of(total: f64) -> Self {
        if total > 0.0 {
            Self::Upward
        } else if total < 0.0 {
            Self::Downward
        } else {
            Self::None
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Upward => "Net upward",
            Self::Downward => "Net downward",
            Self::None => "No net",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompNarrative {
    pub position: usize,
    pub filename: String,
    pub direction: NetDirection,
    pub text: String,
}

/// "Add $3,000 for bedroom count" for every non-zero adjustment.
pub fn adjustment_phrases(adjusted: &AdjustedComp) -> Vec<String> {
    adjusted
        .adjustments
        .entries()
        .filter(|(_, value)| *value != 0.0)
        .map(|(kind, value)| {
            let verb = if value > 0.0 { "Add" } else { "Deduct" };
            format!(
                "{verb} {} for {}",
                format_currency(value.abs()),
                kind.description()
            )
        })
        .collect()
}

/// One narrative sentence for the comp at `position` (1-based).
pub fn describe_comp(position: usize, adjusted: &AdjustedComp) -> CompNarrative {
    let phrases = adjustment_phrases(adjusted);
    let body = if phrases.is_empty() {
        "No adjustments".to_string()
    } else {
        phrases.join(", ")
    };
    let direction = NetDirection::of(adjusted.total_adjustment);

    let text = format!(
        "Comp {position} ({}): {body}. {} adjustment of {}.",
        adjusted.comp.filename,
        direction.label(),
        format_currency(adjusted.total_adjustment.abs()),
    );

    CompNarrative {
        position,
        filename: adjusted.comp.filename.clone(),
        direction,
        text,
    }
}

pub fn narrate(outcome: &AdjustmentOutcome) -> Vec<CompNarrative> {
    outcome
        .adjusted_comps
        .iter()
        .enumerate()
        .map(|(index, adjusted)| describe_comp(index + 1, adjusted))
        .collect()
}
