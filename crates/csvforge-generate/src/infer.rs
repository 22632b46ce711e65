use std::collections::HashSet;

use csvforge_core::{CellValue, ColumnSchema, DataType, Dataset};

/// Distinct values listed per inferred column.
pub const MAX_LISTED_VALUES: usize = 100;

/// Describe an imported dataset as a schema of `fromloadcsv` columns.
///
/// The range text of each column lists its distinct non-empty values in
/// first-seen order, joined by `", "`, capped at [`MAX_LISTED_VALUES`].
pub fn infer_schema(dataset: &Dataset) -> Vec<ColumnSchema> {
    dataset
        .columns()
        .iter()
        .enumerate()
        .map(|(position, name)| {
            let mut seen = HashSet::new();
            let values: Vec<String> = dataset
                .rows()
                .iter()
                .map(|row| &row[position])
                .filter(|cell| !cell.is_missing())
                .map(CellValue::to_csv)
                .filter(|value| seen.insert(value.clone()))
                .take(MAX_LISTED_VALUES)
                .collect();
            ColumnSchema::new(name.clone(), DataType::FromLoadCsv, values.join(", "))
        })
        .collect()
}
