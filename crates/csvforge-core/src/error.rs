use thiserror::Error;

/// Core error type shared across csvforge crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The dataset violates its rectangular shape.
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),
    /// A column lookup by name failed.
    #[error("column not found: {0}")]
    ColumnNotFound(String),
}

/// Convenience alias for results returned by csvforge crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Per-column validation failure. Always names the offending column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Empty column name or empty/unknown data type.
    #[error("column '{column}': {reason}")]
    Schema { column: String, reason: String },
    /// Range text does not follow the syntax of its data type.
    #[error("column '{column}': malformed range: {reason}")]
    RangeFormat { column: String, reason: String },
    /// Range text parses but describes an empty or inverted range.
    #[error("column '{column}': invalid range: {reason}")]
    RangeSemantic { column: String, reason: String },
    /// Auxiliary data needed by the column is missing.
    #[error("column '{column}': {reason}")]
    ContextUnavailable { column: String, reason: String },
}

impl ValidationError {
    pub fn column(&self) -> &str {
        match self {
            ValidationError::Schema { column, .. }
            | ValidationError::RangeFormat { column, .. }
            | ValidationError::RangeSemantic { column, .. }
            | ValidationError::ContextUnavailable { column, .. } => column,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            ValidationError::Schema { reason, .. }
            | ValidationError::RangeFormat { reason, .. }
            | ValidationError::RangeSemantic { reason, .. }
            | ValidationError::ContextUnavailable { reason, .. } => reason,
        }
    }

    /// Stable code for reports and logs.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::Schema { .. } => "schema",
            ValidationError::RangeFormat { .. } => "range_format",
            ValidationError::RangeSemantic { .. } => "range_semantic",
            ValidationError::ContextUnavailable { .. } => "context_unavailable",
        }
    }
}
