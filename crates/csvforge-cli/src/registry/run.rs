use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use csvforge_core::{Dataset, IndexMode};
use csvforge_generate::{GenerationReport, write_dataset_csv};

use super::{RegistryError, RegistryResult};

/// Serializable options for a generation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOptions {
    pub rows: usize,
    pub index: IndexMode,
    pub extend: bool,
    pub seed: Option<u64>,
    pub schema_path: PathBuf,
    pub import_path: Option<PathBuf>,
}

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub run_dir: PathBuf,
    pub options: RunOptions,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
pub struct RunConfig {
    pub run_id: String,
    pub started_at: String,
    pub cli_version: String,
    pub options: RunOptions,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub dataset_path: PathBuf,
    pub report_path: PathBuf,
    pub logs_path: PathBuf,
}

pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx.run_dir.join(format!("{timestamp}__run_{}", ctx.run_id));

    create_dir_all(&root)?;

    let config = RunConfig {
        run_id: ctx.run_id.clone(),
        started_at: ctx.started_at.to_rfc3339(),
        cli_version: env!("CARGO_PKG_VERSION").to_string(),
        options: ctx.options.clone(),
    };
    write_json(&root.join("config.json"), &config)?;

    let logs_path = root.join("logs.ndjson");
    OpenOptions::new().create(true).append(true).open(&logs_path)?;

    Ok(RunPaths {
        dataset_path: root.join("dataset.csv"),
        report_path: root.join("generation_report.json"),
        logs_path,
        root,
    })
}

/// Write the dataset and report into the run directory, returning CSV bytes.
pub fn write_outputs(
    paths: &RunPaths,
    dataset: &Dataset,
    report: &GenerationReport,
) -> RegistryResult<u64> {
    let bytes = write_dataset_csv(&paths.dataset_path, dataset)?;
    write_json(&paths.report_path, report)?;
    Ok(bytes)
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> RegistryResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, value).map_err(RegistryError::from)
}
