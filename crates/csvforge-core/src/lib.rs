//! Core contracts for csvforge.
//!
//! This crate defines the column schema, the range grammar, the cell and
//! dataset model, and the context-free validation shared by the generator
//! and the CLI.

pub mod dataset;
pub mod error;
pub mod range;
pub mod schema;
pub mod types;
pub mod validation;
pub mod value;

pub use dataset::Dataset;
pub use error::{Error, Result, ValidationError};
pub use range::{RangeError, RangeSpec, parse_range};
pub use schema::{ColumnSchema, SchemaFile};
pub use types::{DataType, IndexMode};
pub use validation::{ValidatedColumn, check_unique_names, validate_column, validate_schema};
pub use value::{CellValue, DATE_FORMAT, TIME_FORMAT};
