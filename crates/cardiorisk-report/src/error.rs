use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot load font {path}: {reason}")]
    Font { path: PathBuf, reason: String },

    #[error("pdf error: {0}")]
    Pdf(String),

    #[error("writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
