use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use csvforge_core::{CellValue, Dataset};

use crate::errors::GenerationError;

/// Literal cell text the importer counts as a not-a-number marker.
pub const NAN_MARKER: &str = "NaN";

/// Parse CSV text into a dataset.
///
/// The first record is the header. Quoted fields may hold delimiters,
/// doubled quotes and line breaks. Empty cells become [`CellValue::Missing`],
/// everything else is kept as text. Rows shorter than the header are padded
/// with missing cells; longer rows are rejected.
pub fn parse(text: &str) -> Result<Dataset, GenerationError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let Some(header) = records.next() else {
        return Ok(Dataset::default());
    };
    let columns: Vec<String> = header?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for (idx, record) in records.enumerate() {
        let record = record?;
        if record.len() > columns.len() {
            return Err(GenerationError::MalformedCsv(format!(
                "line {} has {} fields but the header has {}",
                idx + 2,
                record.len(),
                columns.len()
            )));
        }
        let mut row: Vec<CellValue> = record.iter().map(CellValue::from).collect();
        row.resize(columns.len(), CellValue::Missing);
        rows.push(row);
    }

    Ok(Dataset::new(columns, rows)?)
}

/// Counts gathered while importing a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub rows: usize,
    pub columns: usize,
    pub dropped_empty_rows: usize,
    pub missing_cells: usize,
    pub nan_cells: usize,
    pub rows_with_missing: usize,
    pub renamed_headers: usize,
}

#[derive(Debug, Clone)]
pub struct ImportedCsv {
    pub dataset: Dataset,
    pub summary: ImportSummary,
}

/// Parse a user file and normalize it for use as imported context.
///
/// Blank headers become `Column_N` (1-based position), repeated headers get
/// `_2`, `_3`, ... suffixes, and rows with no values are dropped.
pub fn import_csv(text: &str) -> Result<ImportedCsv, GenerationError> {
    let (columns, rows) = parse(text)?.into_parts();
    let mut summary = ImportSummary::default();

    let columns = normalize_headers(columns, &mut summary);
    let before = rows.len();
    let rows: Vec<Vec<CellValue>> = rows
        .into_iter()
        .filter(|row| !row.iter().all(CellValue::is_missing))
        .collect();
    summary.dropped_empty_rows = before - rows.len();

    for row in &rows {
        let missing = row.iter().filter(|cell| cell.is_missing()).count();
        summary.missing_cells += missing;
        if missing > 0 {
            summary.rows_with_missing += 1;
        }
        summary.nan_cells += row
            .iter()
            .filter(|cell| cell.as_str().is_some_and(|text| text.trim() == NAN_MARKER))
            .count();
    }
    summary.rows = rows.len();
    summary.columns = columns.len();

    Ok(ImportedCsv {
        dataset: Dataset::new(columns, rows)?,
        summary,
    })
}

fn normalize_headers(columns: Vec<String>, summary: &mut ImportSummary) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut normalized = Vec::with_capacity(columns.len());
    for (position, column) in columns.into_iter().enumerate() {
        let trimmed = column.trim();
        let base = if trimmed.is_empty() {
            format!("Column_{}", position + 1)
        } else {
            trimmed.to_string()
        };
        let mut name = base.clone();
        let mut suffix = 2;
        while seen.contains(&name) {
            name = format!("{base}_{suffix}");
            suffix += 1;
        }
        if name != column {
            summary.renamed_headers += 1;
        }
        seen.insert(name.clone());
        normalized.push(name);
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_fields_keep_delimiters() {
        let dataset = parse("a,b\n\"x,y\",\"say \"\"hi\"\"\"").expect("parse");
        assert_eq!(dataset.columns(), ["a", "b"]);
        assert_eq!(dataset.rows()[0][0], CellValue::Text("x,y".to_string()));
        assert_eq!(dataset.rows()[0][1], CellValue::Text("say \"hi\"".to_string()));
    }

    #[test]
    fn short_rows_are_padded() {
        let dataset = parse("a,b,c\n1").expect("parse");
        assert_eq!(
            dataset.rows()[0],
            vec![
                CellValue::Text("1".to_string()),
                CellValue::Missing,
                CellValue::Missing
            ]
        );
    }

    #[test]
    fn long_rows_are_rejected() {
        let err = parse("a\n1,2").expect_err("too many fields");
        assert!(matches!(err, GenerationError::MalformedCsv(_)));
    }

    #[test]
    fn empty_input_is_an_empty_dataset() {
        let dataset = parse("").expect("parse");
        assert_eq!(dataset.column_count(), 0);
        assert!(dataset.is_empty());
    }

    #[test]
    fn byte_order_mark_is_stripped() {
        let dataset = parse("\u{feff}id,name\n1,x").expect("parse");
        assert_eq!(dataset.columns()[0], "id");
    }
}
