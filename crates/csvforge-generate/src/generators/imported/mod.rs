use csvforge_core::{CellValue, DataType, Dataset, RangeSpec};

use crate::errors::GenerationError;
use crate::generators::{Generator, GeneratorContext, GeneratorRegistry, spec_mismatch};

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register_generator(Box::new(ImportedColumnGenerator));
}

/// Copies the same-named column of the imported dataset, row by row.
struct ImportedColumnGenerator;

impl ImportedColumnGenerator {
    fn source<'a>(ctx: &GeneratorContext<'a>) -> Result<(&'a Dataset, usize), GenerationError> {
        let imported = ctx.imported.ok_or_else(|| {
            GenerationError::context_unavailable(ctx.column, "no imported dataset is loaded")
        })?;
        let idx = imported.column_index(ctx.column).ok_or_else(|| {
            GenerationError::context_unavailable(
                ctx.column,
                "imported dataset has no column with this name",
            )
        })?;
        Ok((imported, idx))
    }
}

impl Generator for ImportedColumnGenerator {
    fn data_type(&self) -> DataType {
        DataType::FromLoadCsv
    }

    fn generate_value(
        &self,
        ctx: &GeneratorContext<'_>,
        spec: &RangeSpec,
        _rng: &mut dyn rand::RngCore,
    ) -> Result<CellValue, GenerationError> {
        if !matches!(spec, RangeSpec::Passthrough) {
            return Err(spec_mismatch(self, spec));
        }
        let (imported, idx) = Self::source(ctx)?;
        imported
            .rows()
            .get(ctx.row_index)
            .map(|row| row[idx].clone())
            .ok_or_else(|| {
                GenerationError::context_unavailable(
                    ctx.column,
                    format!(
                        "row {} is beyond the {} imported rows",
                        ctx.row_index + 1,
                        imported.row_count()
                    ),
                )
            })
    }
}
