use std::path::PathBuf;

use cardiorisk_core::FeatureError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact not found: {0}")]
    NotFound(PathBuf),

    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("model JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("incompatible model format version {found} (expected {expected})")]
    IncompatibleVersion { found: u32, expected: u32 },

    #[error("unsupported model format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("invalid model parameters: {0}")]
    InvalidParameters(String),

    #[error("feature schema does not match the model: {0}")]
    SchemaMismatch(String),

    #[error(transparent)]
    Input(#[from] FeatureError),

    #[cfg(feature = "onnx")]
    #[error("onnx runtime error: {0}")]
    Onnx(String),

    #[error("unexpected model output: {0}")]
    UnexpectedOutput(String),
}
