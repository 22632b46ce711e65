use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use csvforge_core::{
    CellValue, DataType, Dataset, IndexMode, ValidatedColumn, ValidationError, validate_schema,
};

use crate::errors::GenerationError;
use crate::generators::{GenerationContext, GeneratorContext, GeneratorRegistry};
use crate::index::generate_index;
use crate::model::{GenerateOptions, GenerationReport, GenerationRequest, GenerationResult};

/// Entry point for turning a column schema list into a dataset.
#[derive(Debug)]
pub struct GenerationEngine {
    options: GenerateOptions,
    registry: GeneratorRegistry,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self {
            options,
            registry: GeneratorRegistry::new(),
        }
    }

    /// Run every check `run` performs before generating anything.
    ///
    /// Returns the validated columns in caller order.
    pub fn validate(
        &self,
        request: &GenerationRequest,
        ctx: &GenerationContext<'_>,
    ) -> Result<Vec<ValidatedColumn>, GenerationError> {
        let extend_source = extend_source(request, ctx)?;
        let rows = extend_source.map_or(request.rows, Dataset::row_count);
        let columns = validate_schema(&request.columns)?;
        for column in &columns {
            check_context(column, rows, ctx)?;
            if self.registry.generator(column.data_type).is_none() {
                return Err(GenerationError::InvalidRequest(format!(
                    "no generator registered for '{}'",
                    column.data_type
                )));
            }
        }
        Ok(columns)
    }

    pub fn run(
        &self,
        request: &GenerationRequest,
        ctx: &GenerationContext<'_>,
    ) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let columns = match self.validate(request, ctx) {
            Ok(columns) => columns,
            Err(err) => {
                warn!(run_id = %run_id, error = %err, "schema rejected");
                return Err(err);
            }
        };

        let extend_source = extend_source(request, ctx)?;
        let rows = extend_source.map_or(request.rows, Dataset::row_count);
        let mut rng = ChaCha8Rng::seed_from_u64(self.options.seed.unwrap_or_else(rand::random));
        let mut report = GenerationReport::new(run_id.clone());
        report.extended = extend_source.is_some();

        info!(
            run_id = %run_id,
            rows,
            columns = columns.len(),
            index = ?request.index,
            extend = report.extended,
            seed = self.options.seed,
            "generation started"
        );

        let mut output: Vec<(String, Vec<CellValue>)> = Vec::new();
        if let Some(index) = generate_index(request.index, rows, &mut rng) {
            if matches!(request.index, IndexMode::Custom { .. }) {
                report.record_index_placeholders(
                    index.iter().filter(|value| value.is_missing()).count(),
                );
            }
            output.push((IndexMode::HEADER.to_string(), index));
        }

        if let Some(imported) = extend_source {
            for (position, name) in imported.columns().iter().enumerate() {
                let values = imported
                    .rows()
                    .iter()
                    .map(|row| row[position].clone())
                    .collect();
                output.push((name.clone(), values));
            }
        }

        for column in &columns {
            let generator = self.registry.generator(column.data_type).ok_or_else(|| {
                GenerationError::InvalidRequest(format!(
                    "no generator registered for '{}'",
                    column.data_type
                ))
            })?;
            let column_ctx = GeneratorContext::for_column(&column.name, ctx);
            let values = generator.generate(&column_ctx, &column.spec, rows, &mut rng)?;
            report.record_generator_usage(generator.id());
            debug!(
                column = %column.name,
                generator = generator.id(),
                rows = values.len(),
                "column generated"
            );
            output.push((column.name.clone(), values));
        }

        let dataset = Dataset::from_columns(output)?;
        report.rows = dataset.row_count() as u64;
        report.columns = dataset.column_count() as u64;
        report.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            run_id = %run_id,
            rows = report.rows,
            columns = report.columns,
            index_placeholders = report.index_placeholders,
            duration_ms = report.duration_ms,
            "generation completed"
        );
        Ok(GenerationResult { dataset, report })
    }
}

impl Default for GenerationEngine {
    fn default() -> Self {
        Self::new(GenerateOptions::default())
    }
}

fn extend_source<'a>(
    request: &GenerationRequest,
    ctx: &GenerationContext<'a>,
) -> Result<Option<&'a Dataset>, GenerationError> {
    if !request.extend {
        return Ok(None);
    }
    ctx.imported.map(Some).ok_or_else(|| {
        GenerationError::InvalidRequest("extend mode requires an imported dataset".to_string())
    })
}

/// Checks that need data outside the schema itself.
fn check_context(
    column: &ValidatedColumn,
    rows: usize,
    ctx: &GenerationContext<'_>,
) -> Result<(), ValidationError> {
    let unavailable = |reason: String| ValidationError::ContextUnavailable {
        column: column.name.clone(),
        reason,
    };
    match column.data_type {
        DataType::Name => {
            let lexicon = ctx.lexicon.get().map_err(unavailable)?;
            if !lexicon.is_complete() {
                return Err(unavailable(
                    "name lexicon is missing first or last names".to_string(),
                ));
            }
        }
        DataType::FromLoadCsv => {
            let imported = ctx
                .imported
                .ok_or_else(|| unavailable("no imported dataset is loaded".to_string()))?;
            if imported.column_index(&column.name).is_none() {
                return Err(unavailable(format!(
                    "imported dataset has no column '{}'",
                    column.name
                )));
            }
            if imported.row_count() < rows {
                return Err(unavailable(format!(
                    "{} rows requested but only {} imported",
                    rows,
                    imported.row_count()
                )));
            }
        }
        _ => {}
    }
    Ok(())
}
