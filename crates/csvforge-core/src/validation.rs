use std::collections::HashSet;

use crate::error::ValidationError;
use crate::range::{RangeError, RangeSpec, parse_range};
use crate::schema::ColumnSchema;
use crate::types::DataType;

/// A column that passed validation, ready for generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedColumn {
    pub name: String,
    pub data_type: DataType,
    pub spec: RangeSpec,
}

/// Validate a single column.
///
/// This checks:
/// - the name is not blank
/// - the data type is present and known
/// - the range text follows the grammar of the data type
pub fn validate_column(
    position: usize,
    column: &ColumnSchema,
) -> Result<ValidatedColumn, ValidationError> {
    let label = column.label(position);

    if column.name.trim().is_empty() {
        return Err(ValidationError::Schema {
            column: label,
            reason: "column name must not be empty".to_string(),
        });
    }

    if column.data_type.trim().is_empty() {
        return Err(ValidationError::Schema {
            column: label,
            reason: "data type must not be empty".to_string(),
        });
    }

    let data_type: DataType = column
        .data_type
        .parse()
        .map_err(|reason| ValidationError::Schema {
            column: label.clone(),
            reason,
        })?;

    let spec = parse_range(data_type, &column.range).map_err(|err| match err {
        RangeError::Format(reason) => ValidationError::RangeFormat {
            column: label.clone(),
            reason,
        },
        RangeError::Semantic(reason) => ValidationError::RangeSemantic {
            column: label.clone(),
            reason,
        },
    })?;

    Ok(ValidatedColumn {
        name: column.name.clone(),
        data_type,
        spec,
    })
}

/// Validate every column, stopping at the first failure.
pub fn validate_schema(columns: &[ColumnSchema]) -> Result<Vec<ValidatedColumn>, ValidationError> {
    columns
        .iter()
        .enumerate()
        .map(|(position, column)| validate_column(position, column))
        .collect()
}

/// Reject a schema whose names repeat, or that reuse a name in `taken`.
///
/// `taken` holds headers the table already has before the schema columns,
/// such as the index column or imported columns in extend mode.
/// Blank names are left to [`validate_column`].
pub fn check_unique_names(
    columns: &[ColumnSchema],
    taken: &[String],
) -> Result<(), ValidationError> {
    let mut seen: HashSet<&str> = taken.iter().map(String::as_str).collect();
    for (position, column) in columns.iter().enumerate() {
        if column.name.trim().is_empty() {
            continue;
        }
        if !seen.insert(column.name.as_str()) {
            return Err(ValidationError::Schema {
                column: column.label(position),
                reason: format!("column name '{}' is used more than once", column.name),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_schema_names_are_rejected() {
        let columns = vec![
            ColumnSchema::new("a", DataType::Boolean, ""),
            ColumnSchema::new("a", DataType::Phone, ""),
        ];
        let err = check_unique_names(&columns, &[]).expect_err("duplicate name");
        assert_eq!(err.column(), "a");
        assert_eq!(err.code(), "schema");
    }

    #[test]
    fn names_already_in_the_table_are_rejected() {
        let columns = vec![ColumnSchema::new("city", DataType::Email, "")];
        let taken = vec!["index".to_string(), "city".to_string()];
        assert!(check_unique_names(&columns, &taken).is_err());
        assert!(check_unique_names(&columns, &taken[..1]).is_ok());
    }
}
