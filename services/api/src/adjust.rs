use crate::infra::{parse_condition, parse_date, AdjustmentResponse};
use chrono::{Local, NaiveDate};
use clap::Args;
use comp_adjust::config::AppConfig;
use comp_adjust::error::AppError;
use comp_adjust::workflows::appraisal::report::write_csv_path;
use comp_adjust::workflows::appraisal::{
    AdjustmentEngine, AdjustmentOutcome, AppraisalWorkflow, ConditionRating, SubjectProperty,
};
use comp_adjust::workflows::extraction::{
    CompDocument, ExtractionFileImporter, HttpCompExtractor,
};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct AdjustArgs {
    /// Subject property JSON (sqft, year, beds, full, half, acreage, finish, garage, condition)
    #[arg(long)]
    pub(crate) subject: PathBuf,
    /// Saved extraction response (`{"comps": [...]}` or a bare array)
    #[arg(long, conflicts_with = "document", required_unless_present = "document")]
    pub(crate) comps: Option<PathBuf>,
    /// Comp document to send to the extraction service (repeat per comp)
    #[arg(long)]
    pub(crate) document: Vec<PathBuf>,
    /// Condition rating 0-4 per comp, in comp order. Defaults to 2 (Average) for every comp.
    #[arg(long, value_parser = parse_condition)]
    pub(crate) condition: Vec<ConditionRating>,
    /// Date stamped on the report (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Also write the adjustment grid as CSV
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Print the outcome as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run_adjust(args: AdjustArgs) -> Result<(), AppError> {
    let AdjustArgs {
        subject,
        comps,
        document,
        condition,
        as_of,
        csv,
        json,
    } = args;

    let subject = load_subject(&subject)?;
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());

    let outcome = match comps {
        Some(path) => {
            let response = ExtractionFileImporter::from_path(path)?;
            let conditions = conditions_for(condition, response.comps.len());
            AdjustmentEngine::standard().compute(&subject, &response.comps, &conditions)?
        }
        None => {
            let config = AppConfig::load()?;
            let documents = document
                .iter()
                .map(CompDocument::from_path)
                .collect::<Result<Vec<_>, _>>()?;
            let conditions = conditions_for(condition, documents.len());
            let extractor = HttpCompExtractor::from_config(&config.extraction);
            AppraisalWorkflow::new(extractor)
                .run(&subject, &documents, &conditions)
                .await?
        }
    };

    if let Some(path) = csv.as_ref() {
        write_csv_path(&outcome, path)?;
    }

    if json {
        let payload = AdjustmentResponse::new(as_of, outcome);
        let rendered = serde_json::to_string_pretty(&payload).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        render_outcome(as_of, outcome);
        if let Some(path) = csv {
            println!("\nGrid written to {}", path.display());
        }
    }

    Ok(())
}

fn load_subject(path: &Path) -> Result<SubjectProperty, AppError> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        AppError::invalid_input(format!("subject property {}", path.display()), source)
    })
}

/// Operator-supplied ratings, or Average for every comp when none were given.
fn conditions_for(supplied: Vec<ConditionRating>, comps: usize) -> Vec<ConditionRating> {
    if supplied.is_empty() {
        vec![ConditionRating::default(); comps]
    } else {
        supplied
    }
}

fn render_outcome(as_of: NaiveDate, outcome: AdjustmentOutcome) {
    let response = AdjustmentResponse::new(as_of, outcome);

    println!("Comparable adjustments as of {}", response.as_of);
    println!("{}", response.report.table.render_text());

    println!("\nNarrative");
    for entry in &response.report.narrative {
        println!("  {}", entry.text);
    }

    if !response.outcome.warnings.is_empty() {
        println!(
            "\nData quality warnings ({})",
            response.outcome.warnings.len()
        );
        for warning in &response.outcome.warnings {
            println!("  - {warning}");
        }
    }
}
