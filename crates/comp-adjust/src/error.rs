use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::appraisal::{AdjustmentError, AppraisalError};
use crate::workflows::extraction::ExtractionError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Appraisal(AppraisalError),
    Export(csv::Error),
    InvalidInput {
        context: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Appraisal(err) => write!(f, "appraisal error: {}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
            AppError::InvalidInput { context, source } => {
                write!(f, "invalid {}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Appraisal(err) => Some(err),
            AppError::Export(err) => Some(err),
            AppError::InvalidInput { source, .. } => Some(source),
        }
    }
}

impl AppError {
    pub fn invalid_input(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::InvalidInput {
            context: context.into(),
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Appraisal(AppraisalError::Adjustment(AdjustmentError::NoSoldComps)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Appraisal(AppraisalError::Adjustment(_)) | AppError::InvalidInput { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::Appraisal(AppraisalError::Extraction(_)) => StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<AppraisalError> for AppError {
    fn from(value: AppraisalError) -> Self {
        Self::Appraisal(value)
    }
}

impl From<AdjustmentError> for AppError {
    fn from(value: AdjustmentError) -> Self {
        Self::Appraisal(value.into())
    }
}

impl From<ExtractionError> for AppError {
    fn from(value: ExtractionError) -> Self {
        Self::Appraisal(value.into())
    }
}

impl From<csv::Error> for AppError {
    fn from(value: csv::Error) -> Self {
        Self::Export(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjustment_errors_map_to_client_statuses() {
        let count: AppError = AdjustmentError::InputCount { count: 7 }.into();
        assert_eq!(count.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            count.to_string(),
            "appraisal error: between 1 and 6 comps are required, got 7"
        );

        let unsold: AppError = AdjustmentError::NoSoldComps.into();
        assert_eq!(unsold.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let extraction: AppError = ExtractionError::Malformed("empty".to_string()).into();
        assert_eq!(extraction.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn malformed_input_names_what_was_rejected() {
        let source = serde_json::from_str::<serde_json::Value>("{\"sqft\":")
            .expect_err("truncated json");
        let err = AppError::invalid_input("subject property subject.json", source);

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err
            .to_string()
            .starts_with("invalid subject property subject.json: EOF while parsing"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
