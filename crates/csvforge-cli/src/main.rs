mod registry;
mod workspace;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use csvforge_core::{
    ColumnSchema, DataType, Dataset, Error as CoreError, IndexMode, SchemaFile,
    check_unique_names,
};
use csvforge_generate::assets::{LexiconHandle, default_lexicon_path, load_lexicon};
use csvforge_generate::{
    GenerateOptions, GenerationContext, GenerationEngine, GenerationError, GenerationRequest,
    import_csv, infer_schema, parse, search_rows, serialize, write_dataset_csv,
};
use registry::{
    RunContext, RunOptions, init_run_logging, init_stderr_logging, start_run, write_json,
    write_outputs,
};
use thiserror::Error;
use uuid::Uuid;
use workspace::{DatasetStore, FileStore, IndexSetting, SETTINGS_FILE, Settings, load_settings};

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("workspace error: {0}")]
    Workspace(#[from] workspace::WorkspaceError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("background task failed: {0}")]
    Task(String),
}

#[derive(Parser, Debug)]
#[command(name = "csvforge", version, about = "Synthetic CSV data generator")]
struct Cli {
    /// Settings file; defaults apply when it does not exist.
    #[arg(long, global = true, default_value = SETTINGS_FILE)]
    config: PathBuf,
    /// Append JSON logs to this file instead of the default target.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a dataset from a schema file.
    Generate(GenerateArgs),
    /// Check a schema file without generating anything.
    Validate(RequestArgs),
    /// Load a CSV file, normalize it and infer a schema from it.
    Import(ImportArgs),
    /// Search rows of a CSV file or of the stored dataset.
    Search(SearchArgs),
    /// Remove the stored dataset.
    Clear,
    /// Print the JSON Schema of schema files.
    JsonSchema(JsonSchemaArgs),
}

#[derive(Args, Debug)]
struct RequestArgs {
    /// Schema file: a JSON array of {"name", "type", "range"}.
    #[arg(long)]
    schema: PathBuf,
    /// Number of rows (ignored with --extend).
    #[arg(long)]
    rows: Option<usize>,
    /// Index column mode.
    #[arg(long, value_enum)]
    index: Option<IndexSetting>,
    /// MIN-MAX bounds for --index custom.
    #[arg(long, value_name = "MIN-MAX")]
    index_range: Option<String>,
    /// CSV file used by `fromloadcsv` columns and --extend.
    #[arg(long = "import", value_name = "CSV")]
    import_path: Option<PathBuf>,
    /// Prepend the imported columns and generate only the schema columns.
    #[arg(long, default_value_t = false, requires = "import_path")]
    extend: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    request: RequestArgs,
    /// Fixed RNG seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Output directory for runs.
    #[arg(long)]
    run_dir: Option<PathBuf>,
    /// Also write the CSV to this path.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Print the CSV to stdout.
    #[arg(long, default_value_t = false)]
    stdout: bool,
    /// Replace the stored dataset with the result.
    #[arg(long, default_value_t = false)]
    save: bool,
}

#[derive(Args, Debug)]
struct ImportArgs {
    /// CSV file to import.
    file: PathBuf,
    /// Write the inferred schema to this path.
    #[arg(long)]
    schema_out: Option<PathBuf>,
    /// Replace the stored dataset with the normalized import.
    #[arg(long, default_value_t = false)]
    save: bool,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Comma-separated search terms.
    query: String,
    /// CSV file to search instead of the stored dataset.
    #[arg(long)]
    input: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct JsonSchemaArgs {
    /// Write to this path instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = load_settings(&cli.config)?;

    match &cli.log_file {
        Some(path) => init_run_logging(path)?,
        // generate logs into its run directory
        None if matches!(cli.command, Command::Generate(_)) => {}
        None => init_stderr_logging()?,
    }

    match cli.command {
        Command::Generate(args) => run_generate(args, &settings, cli.log_file.is_none()).await,
        Command::Validate(args) => run_validate(args, &settings).await,
        Command::Import(args) => run_import(args, &settings).await,
        Command::Search(args) => run_search(args, &settings).await,
        Command::Clear => run_clear(&settings),
        Command::JsonSchema(args) => run_json_schema(args),
    }
}

/// Everything a generation call borrows.
struct Prepared {
    request: GenerationRequest,
    lexicon: LexiconHandle,
    imported: Option<Dataset>,
}

impl Prepared {
    fn context(&self) -> GenerationContext<'_> {
        let ctx = GenerationContext::new(&self.lexicon);
        match &self.imported {
            Some(imported) => ctx.with_imported(imported),
            None => ctx,
        }
    }
}

async fn prepare(args: &RequestArgs, settings: &Settings) -> Result<Prepared, CliError> {
    let lexicon_path = settings
        .lexicon_path
        .clone()
        .unwrap_or_else(default_lexicon_path);
    let lexicon_task = tokio::spawn(async move { load_lexicon(&lexicon_path).await });

    let schema: SchemaFile =
        serde_json::from_str(&tokio::fs::read_to_string(&args.schema).await?)?;

    let imported = match &args.import_path {
        Some(path) => {
            let imported = import_csv(&tokio::fs::read_to_string(path).await?)?;
            tracing::info!(
                event = "import_loaded",
                path = %path.display(),
                rows = imported.summary.rows,
                columns = imported.summary.columns
            );
            Some(imported.dataset)
        }
        None => None,
    };

    let index = resolve_index(args, settings)?;
    let prepended = if args.extend { imported.as_ref() } else { None };
    check_table_names(&schema.columns, index, prepended)?;

    let rows = args.rows.unwrap_or(settings.rows);
    let mut request = GenerationRequest::new(schema.columns, rows).with_index(index);
    if args.extend {
        request = request.extending();
    }

    let lexicon = LexiconHandle::pending();
    let needs_names = request
        .columns
        .iter()
        .any(|column| column.data_type == DataType::Name.as_str());
    if needs_names {
        let outcome = lexicon_task
            .await
            .map_err(|err| CliError::Task(err.to_string()))?;
        lexicon.resolve(outcome);
        if let Err(reason) = lexicon.get() {
            tracing::warn!(event = "lexicon_unavailable", reason = %reason);
        }
    } else {
        lexicon_task.abort();
    }

    Ok(Prepared {
        request,
        lexicon,
        imported,
    })
}

fn resolve_index(args: &RequestArgs, settings: &Settings) -> Result<IndexMode, CliError> {
    Ok(settings.index_mode(args.index, args.index_range.as_deref())?)
}

/// Column names must be unique across the whole output table: the index
/// column, the prepended imported columns and the schema columns.
fn check_table_names(
    columns: &[ColumnSchema],
    index: IndexMode,
    prepended: Option<&Dataset>,
) -> Result<(), CliError> {
    let mut taken = Vec::new();
    if index != IndexMode::None {
        taken.push(IndexMode::HEADER.to_string());
    }
    if let Some(imported) = prepended {
        taken.extend(imported.columns().iter().cloned());
    }
    check_unique_names(columns, &taken).map_err(GenerationError::from)?;
    Ok(())
}

async fn run_generate(
    args: GenerateArgs,
    settings: &Settings,
    log_to_run: bool,
) -> Result<(), CliError> {
    let run_id = Uuid::new_v4().to_string();
    let seed = args.seed.or(settings.seed);
    let run_dir = args.run_dir.clone().unwrap_or_else(|| settings.run_dir.clone());

    let prepared = prepare(&args.request, settings).await?;
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        run_dir,
        options: RunOptions {
            rows: prepared.request.rows,
            index: prepared.request.index,
            extend: prepared.request.extend,
            seed,
            schema_path: args.request.schema.clone(),
            import_path: args.request.import_path.clone(),
        },
    };
    let run_paths = start_run(&run_ctx)?;
    if log_to_run {
        init_run_logging(&run_paths.logs_path)?;
    }

    tracing::info!(event = "run_started", run_id = %run_id);
    let timer = Instant::now();

    let engine = GenerationEngine::new(GenerateOptions { seed });
    let result = match engine.run(&prepared.request, &prepared.context()) {
        Ok(result) => result,
        Err(err) => {
            tracing::warn!(event = "run_finished", status = "failed", error = %err);
            return Err(err.into());
        }
    };

    let bytes = write_outputs(&run_paths, &result.dataset, &result.report)?;
    tracing::info!(
        event = "dataset_written",
        path = %run_paths.dataset_path.display(),
        bytes
    );

    if let Some(out) = &args.out {
        write_dataset_csv(out, &result.dataset)?;
        tracing::info!(event = "dataset_copied", path = %out.display());
    }

    let csv = serialize(&result.dataset)?;
    if args.save {
        let store = FileStore::new(&settings.store_path);
        store.put(&csv)?;
        tracing::info!(event = "dataset_saved", path = %store.path().display());
    }

    tracing::info!(
        event = "run_finished",
        status = "success",
        rows = result.report.rows,
        duration_ms = timer.elapsed().as_millis() as u64
    );

    if args.stdout {
        println!("{csv}");
    } else {
        println!("{}", run_paths.root.display());
    }
    Ok(())
}

async fn run_validate(args: RequestArgs, settings: &Settings) -> Result<(), CliError> {
    let prepared = prepare(&args, settings).await?;
    let engine = GenerationEngine::default();
    let columns = engine.validate(&prepared.request, &prepared.context())?;
    for column in &columns {
        println!("{}\t{}", column.name, column.data_type);
    }
    tracing::info!(event = "schema_valid", columns = columns.len());
    Ok(())
}

async fn run_import(args: ImportArgs, settings: &Settings) -> Result<(), CliError> {
    let text = tokio::fs::read_to_string(&args.file).await?;
    let imported = import_csv(&text)?;
    let summary = &imported.summary;
    tracing::info!(
        event = "import_finished",
        path = %args.file.display(),
        rows = summary.rows,
        columns = summary.columns,
        dropped_empty_rows = summary.dropped_empty_rows,
        missing_cells = summary.missing_cells
    );

    if let Some(path) = &args.schema_out {
        let schema = SchemaFile {
            columns: infer_schema(&imported.dataset),
        };
        write_json(path, &schema)?;
        tracing::info!(event = "schema_written", path = %path.display());
    }

    if args.save {
        let store = FileStore::new(&settings.store_path);
        store.put(&serialize(&imported.dataset)?)?;
        tracing::info!(event = "dataset_saved", path = %store.path().display());
    }

    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

async fn run_search(args: SearchArgs, settings: &Settings) -> Result<(), CliError> {
    let dataset = match &args.input {
        Some(path) => import_csv(&tokio::fs::read_to_string(path).await?)?.dataset,
        None => load_stored(&FileStore::new(&settings.store_path))?,
    };

    let result = search_rows(&dataset, &args.query);
    tracing::info!(
        event = "search_finished",
        terms = result.terms.len(),
        matches = result.match_count(),
        total_rows = result.total_rows
    );

    eprintln!(
        "{} matching rows ({:.2}%)",
        result.match_count(),
        result.match_percentage
    );
    if result.match_count() > 0 {
        println!("{}", serialize(&result.to_dataset(&dataset)?)?);
    }
    Ok(())
}

fn load_stored(store: &FileStore) -> Result<Dataset, CliError> {
    let csv = store.get()?.ok_or_else(|| {
        CliError::InvalidArgs(format!(
            "no stored dataset at {}; run generate --save or import --save first",
            store.path().display()
        ))
    })?;
    Ok(parse(&csv)?)
}

fn run_clear(settings: &Settings) -> Result<(), CliError> {
    let store = FileStore::new(&settings.store_path);
    let removed = store.clear()?;
    tracing::info!(event = "store_cleared", path = %store.path().display(), removed);
    if removed {
        println!("removed {}", store.path().display());
    } else {
        println!("nothing stored at {}", store.path().display());
    }
    Ok(())
}

fn run_json_schema(args: JsonSchemaArgs) -> Result<(), CliError> {
    let schema = schemars::schema_for!(SchemaFile);
    match &args.out {
        Some(path) => write_json(path, &schema)?,
        None => println!("{}", serde_json::to_string_pretty(&schema)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_schema_names_are_rejected_before_generation() {
        let columns = vec![
            ColumnSchema::new("a", DataType::Boolean, ""),
            ColumnSchema::new("a", DataType::Phone, ""),
        ];
        let err = check_table_names(&columns, IndexMode::None, None).expect_err("duplicate");
        assert!(matches!(err, CliError::Generation(GenerationError::Validation(_))));
    }

    #[test]
    fn schema_names_must_not_shadow_table_headers() {
        let columns = vec![ColumnSchema::new("index", DataType::IntegerRange, "1-5")];
        assert!(check_table_names(&columns, IndexMode::Auto, None).is_err());
        assert!(check_table_names(&columns, IndexMode::None, None).is_ok());

        let imported = import_csv("city,code\nMoscow,77").expect("import").dataset;
        let columns = vec![ColumnSchema::new("code", DataType::Phone, "")];
        assert!(check_table_names(&columns, IndexMode::None, Some(&imported)).is_err());
        assert!(check_table_names(&columns, IndexMode::None, None).is_ok());
    }
}
