use super::{CompDocument, CompExtractor, ExtractionError, ExtractionResponse};
use crate::config::ExtractionConfig;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

/// Multipart field name the extraction service reads uploads from.
const UPLOAD_FIELD: &str = "files[]";

/// Posts documents to the extraction service and decodes its JSON answer.
/// A single attempt is made; failures go straight back to the caller.
#[derive(Debug, Clone)]
pub struct HttpCompExtractor {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCompExtractor {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(config.endpoint.clone())
    }
}

fn document_part(document: &CompDocument) -> Result<Part, reqwest::Error> {
    let mime = mime_guess::from_path(&document.filename).first_or(mime::APPLICATION_PDF);
    Part::bytes(document.bytes.clone())
        .file_name(document.filename.clone())
        .mime_str(mime.as_ref())
}

fn upload_form(documents: &[CompDocument]) -> Result<Form, reqwest::Error> {
    documents.iter().try_fold(Form::new(), |form, document| {
        Ok(form.part(UPLOAD_FIELD, document_part(document)?))
    })
}

impl CompExtractor for HttpCompExtractor {
    async fn extract(
        &self,
        documents: &[CompDocument],
    ) -> Result<ExtractionResponse, ExtractionError> {
        let form = upload_form(documents)?;
        debug!(
            endpoint = %self.endpoint,
            documents = documents.len(),
            "uploading comp documents"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ExtractionError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let payload: ExtractionResponse = serde_json::from_slice(&body)?;
        info!(comps = payload.comps.len(), "extraction service responded");
        Ok(payload)
    }
}
