use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cardiorisk_ai::ModelError;
use cardiorisk_core::FeatureError;
use cardiorisk_report::ReportError;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid input: {0}")]
    Input(#[from] FeatureError),

    #[error("inference failed: {0}")]
    Model(ModelError),

    #[error("report generation failed: {0}")]
    Report(#[from] ReportError),

    #[error("worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<ModelError> for AppError {
    fn from(e: ModelError) -> Self {
        // Arity mismatches are input faults.
        match e {
            ModelError::Input(fe) => Self::Input(fe),
            other => Self::Model(other),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Input(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Model(_) | Self::Report(_) | Self::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Input(e) => {
                warn!(error = %e, "rejected submission");
                format!("Invalid input: {e}")
            }
            other => {
                error!(error = %other, "request failed");
                "Internal server error".to_string()
            }
        };
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_errors_are_unprocessable() {
        let e = AppError::from(FeatureError::Missing("age".into()));
        assert_eq!(e.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn model_arity_errors_become_input_errors() {
        let e = AppError::from(ModelError::Input(FeatureError::Length {
            expected: 13,
            actual: 2,
        }));
        assert!(matches!(e, AppError::Input(_)));
        assert_eq!(e.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn other_model_errors_are_server_errors() {
        let e = AppError::from(ModelError::UnexpectedOutput("nan".into()));
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn report_errors_are_server_errors() {
        let e = AppError::from(ReportError::Pdf("boom".into()));
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
