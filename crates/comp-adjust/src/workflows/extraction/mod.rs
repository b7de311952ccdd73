//! Boundary to the document extraction service.
//!
//! The service receives the uploaded comp documents and answers with one
//! loosely typed record per document. Nothing here interprets the numbers;
//! that is the appraisal normalizer's job.

mod file;
mod http;

pub use file::ExtractionFileImporter;
pub use http::HttpCompExtractor;

use crate::workflows::appraisal::RawComp;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::Path;

/// Body returned by the extraction service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResponse {
    pub comps: Vec<RawComp>,
}

/// An uploaded comp document awaiting extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl CompDocument {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ExtractionError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ExtractionError::Malformed(format!("{} has no file name", path.display()))
            })?;
        Ok(Self { filename, bytes })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("extraction request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("extraction service answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed extraction response: {0}")]
    Malformed(String),
    #[error("failed to read extraction data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid extraction JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Turns uploaded documents into raw comp records.
pub trait CompExtractor: Send + Sync {
    fn extract(
        &self,
        documents: &[CompDocument],
    ) -> impl Future<Output = Result<ExtractionResponse, ExtractionError>> + Send;
}
