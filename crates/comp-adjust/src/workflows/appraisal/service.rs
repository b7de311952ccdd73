use super::domain::{AdjustmentOutcome, ConditionRating, SubjectProperty};
use super::engine::{validate_batch_size, AdjustmentEngine, AdjustmentError};
use crate::workflows::extraction::{CompDocument, CompExtractor, ExtractionError};
use tracing::{info, warn};

/// Upload-to-adjustments workflow: validate the batch, wait for the
/// extraction service, then run the engine.
pub struct AppraisalWorkflow<E> {
    extractor: E,
    engine: AdjustmentEngine,
}

impl<E> AppraisalWorkflow<E>
where
    E: CompExtractor,
{
    pub fn new(extractor: E) -> Self {
        Self::with_engine(extractor, AdjustmentEngine::standard())
    }

    pub fn with_engine(extractor: E, engine: AdjustmentEngine) -> Self {
        Self { extractor, engine }
    }

    pub async fn run(
        &self,
        subject: &SubjectProperty,
        documents: &[CompDocument],
        conditions: &[ConditionRating],
    ) -> Result<AdjustmentOutcome, AppraisalError> {
        validate_batch_size(documents.len())?;
        if conditions.len() != documents.len() {
            return Err(AdjustmentError::ConditionCount {
                comps: documents.len(),
                conditions: conditions.len(),
            }
            .into());
        }

        let response = match self.extractor.extract(documents).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "comp extraction failed");
                return Err(err.into());
            }
        };

        if response.comps.len() != documents.len() {
            return Err(ExtractionError::Malformed(format!(
                "expected {} comp record(s), received {}",
                documents.len(),
                response.comps.len()
            ))
            .into());
        }

        let outcome = self.engine.compute(subject, &response.comps, conditions)?;
        info!(
            comps = outcome.adjusted_comps.len(),
            avg_ppsf = outcome.avg_ppsf,
            size_adj_rate = outcome.size_adj_rate,
            warnings = outcome.warnings.len(),
            "adjustments computed"
        );
        Ok(outcome)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppraisalError {
    #[error(transparent)]
    Adjustment(#[from] AdjustmentError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}
