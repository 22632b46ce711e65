use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use csvforge_core::{ColumnSchema, Dataset, IndexMode};

/// Options for the generation engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Fixed RNG seed; fresh entropy per run when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl GenerateOptions {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

/// One table to generate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub columns: Vec<ColumnSchema>,
    pub rows: usize,
    #[serde(default)]
    pub index: IndexMode,
    /// Prepend the imported dataset and generate only the extra columns.
    #[serde(default)]
    pub extend: bool,
}

impl GenerationRequest {
    pub fn new(columns: Vec<ColumnSchema>, rows: usize) -> Self {
        Self {
            columns,
            rows,
            index: IndexMode::default(),
            extend: false,
        }
    }

    pub fn with_index(mut self, index: IndexMode) -> Self {
        self.index = index;
        self
    }

    pub fn extending(mut self) -> Self {
        self.extend = true;
        self
    }
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub rows: u64,
    pub columns: u64,
    pub extended: bool,
    pub generator_usage: BTreeMap<String, u64>,
    pub index_placeholders: u64,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(run_id: String) -> Self {
        Self {
            run_id,
            rows: 0,
            columns: 0,
            extended: false,
            generator_usage: BTreeMap::new(),
            index_placeholders: 0,
            duration_ms: 0,
        }
    }

    pub fn record_generator_usage(&mut self, id: &str) {
        *self.generator_usage.entry(id.to_string()).or_insert(0) += 1;
    }

    pub fn record_index_placeholders(&mut self, count: usize) {
        self.index_placeholders += count as u64;
    }
}

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub dataset: Dataset,
    pub report: GenerationReport,
}
