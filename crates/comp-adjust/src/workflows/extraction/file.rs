use super::{ExtractionError, ExtractionResponse};
use crate::workflows::appraisal::RawComp;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Saved extraction output: either the service's `{"comps": [...]}` body or
/// a bare array of records.
#[derive(Deserialize)]
#[serde(untagged)]
enum SavedExtraction {
    Response(ExtractionResponse),
    Records(Vec<RawComp>),
}

/// Loads extraction results captured earlier, so a batch can be re-run
/// without sending the documents again.
pub struct ExtractionFileImporter;

impl ExtractionFileImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ExtractionResponse, ExtractionError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ExtractionResponse, ExtractionError> {
        let saved: SavedExtraction = serde_json::from_reader(reader)?;
        Ok(match saved {
            SavedExtraction::Response(response) => response,
            SavedExtraction::Records(comps) => ExtractionResponse { comps },
        })
    }
}
