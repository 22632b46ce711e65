use thiserror::Error;

use csvforge_core::ValidationError;

/// Errors emitted by the generation engine and the CSV codec.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("generator '{generator}' cannot use a {spec} range")]
    SpecMismatch {
        generator: &'static str,
        spec: &'static str,
    },
    #[error("malformed csv: {0}")]
    MalformedCsv(String),
    #[error(transparent)]
    Dataset(#[from] csvforge_core::Error),
    #[error("asset error: {0}")]
    Asset(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl GenerationError {
    pub(crate) fn context_unavailable(column: &str, reason: impl Into<String>) -> Self {
        GenerationError::Validation(ValidationError::ContextUnavailable {
            column: column.to_string(),
            reason: reason.into(),
        })
    }
}
