use serde::Serialize;

use csvforge_core::{CellValue, Dataset};

/// Rows matching a search, with their share of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub terms: Vec<String>,
    pub total_rows: usize,
    /// Positions of matching rows in the searched dataset.
    pub matches: Vec<usize>,
    pub match_percentage: f64,
}

impl SearchResult {
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// The matching rows as a dataset with the original header.
    pub fn to_dataset(&self, source: &Dataset) -> csvforge_core::Result<Dataset> {
        let rows = self
            .matches
            .iter()
            .filter_map(|idx| source.rows().get(*idx).cloned())
            .collect();
        Dataset::new(source.columns().to_vec(), rows)
    }
}

/// Find rows where any cell contains any of the comma-separated `query`
/// terms, ignoring case. Blank terms are ignored.
pub fn search_rows(dataset: &Dataset, query: &str) -> SearchResult {
    let terms: Vec<String> = query
        .split(',')
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect();

    let matches: Vec<usize> = if terms.is_empty() {
        Vec::new()
    } else {
        dataset
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| row_matches(row, &terms))
            .map(|(idx, _)| idx)
            .collect()
    };

    let total_rows = dataset.row_count();
    let match_percentage = if total_rows == 0 {
        0.0
    } else {
        matches.len() as f64 / total_rows as f64 * 100.0
    };

    SearchResult {
        terms,
        total_rows,
        matches,
        match_percentage,
    }
}

fn row_matches(row: &[CellValue], terms: &[String]) -> bool {
    let cells: Vec<String> = row
        .iter()
        .filter(|cell| !cell.is_missing())
        .map(|cell| cell.to_csv().to_lowercase())
        .collect();
    terms
        .iter()
        .any(|term| cells.iter().any(|cell| cell.contains(term.as_str())))
}
