use crate::error::{Error, Result};
use crate::value::CellValue;

/// Rectangular in-memory table: named columns and rows of cells.
///
/// Every row holds exactly `columns.len()` cells. Column names are expected
/// to be unique but duplicates are tolerated; lookups by name resolve to the
/// last matching column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::InvalidDataset(format!(
                    "row {} has {} cells, expected {}",
                    idx + 1,
                    row.len(),
                    columns.len()
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    /// Build a dataset from column-major data.
    pub fn from_columns(columns: Vec<(String, Vec<CellValue>)>) -> Result<Self> {
        let row_count = columns.first().map(|(_, values)| values.len()).unwrap_or(0);
        if let Some((name, values)) = columns.iter().find(|(_, values)| values.len() != row_count) {
            return Err(Error::InvalidDataset(format!(
                "column '{}' has {} values, expected {}",
                name,
                values.len(),
                row_count
            )));
        }

        let mut rows = vec![Vec::with_capacity(columns.len()); row_count];
        let mut names = Vec::with_capacity(columns.len());
        for (name, values) in columns {
            names.push(name);
            for (row, value) in rows.iter_mut().zip(values) {
                row.push(value);
            }
        }
        Ok(Self {
            columns: names,
            rows,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column named `name` (last one wins on duplicates).
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().rposition(|column| column == name)
    }

    /// Values of the column named `name`, top to bottom.
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &CellValue>> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }

    pub fn cell(&self, row: usize, name: &str) -> Option<&CellValue> {
        let idx = self.column_index(name)?;
        self.rows.get(row).map(|cells| &cells[idx])
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<CellValue>>) {
        (self.columns, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_ragged_rows() {
        let result = Dataset::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![CellValue::Int(1)]],
        );
        assert!(matches!(result, Err(Error::InvalidDataset(_))));
    }

    #[test]
    fn duplicate_names_resolve_to_last_column() {
        let dataset = Dataset::new(
            vec!["x".to_string(), "x".to_string()],
            vec![vec![CellValue::Int(1), CellValue::Int(2)]],
        )
        .expect("dataset");
        assert_eq!(dataset.column_index("x"), Some(1));
        assert_eq!(dataset.cell(0, "x"), Some(&CellValue::Int(2)));
    }

    #[test]
    fn from_columns_transposes() {
        let dataset = Dataset::from_columns(vec![
            ("a".to_string(), vec![CellValue::Int(1), CellValue::Int(2)]),
            ("b".to_string(), vec![CellValue::from("x"), CellValue::Missing]),
        ])
        .expect("dataset");
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(
            dataset.rows()[1],
            vec![CellValue::Int(2), CellValue::Missing]
        );
    }
}
