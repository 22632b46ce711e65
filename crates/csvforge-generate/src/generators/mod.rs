pub mod imported;
pub mod primitives;
pub mod semantic;

use std::collections::BTreeMap;

use csvforge_core::{CellValue, DataType, Dataset, RangeSpec};

use crate::assets::LexiconHandle;
use crate::errors::GenerationError;

/// Process-wide auxiliary data a generation call may read.
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    pub lexicon: &'a LexiconHandle,
    pub imported: Option<&'a Dataset>,
}

impl<'a> GenerationContext<'a> {
    pub fn new(lexicon: &'a LexiconHandle) -> Self {
        Self {
            lexicon,
            imported: None,
        }
    }

    pub fn with_imported(mut self, imported: &'a Dataset) -> Self {
        self.imported = Some(imported);
        self
    }
}

/// Per-column view handed to a generator.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorContext<'a> {
    pub column: &'a str,
    pub row_index: usize,
    pub lexicon: &'a LexiconHandle,
    pub imported: Option<&'a Dataset>,
}

impl<'a> GeneratorContext<'a> {
    pub fn for_column(column: &'a str, ctx: &GenerationContext<'a>) -> Self {
        Self {
            column,
            row_index: 0,
            lexicon: ctx.lexicon,
            imported: ctx.imported,
        }
    }
}

/// Produces the values of one data type.
pub trait Generator: Send + Sync {
    fn data_type(&self) -> DataType;

    fn id(&self) -> &'static str {
        self.data_type().as_str()
    }

    fn generate_value(
        &self,
        ctx: &GeneratorContext<'_>,
        spec: &RangeSpec,
        rng: &mut dyn rand::RngCore,
    ) -> Result<CellValue, GenerationError>;

    /// Generate a whole column of `rows` values.
    fn generate(
        &self,
        ctx: &GeneratorContext<'_>,
        spec: &RangeSpec,
        rows: usize,
        rng: &mut dyn rand::RngCore,
    ) -> Result<Vec<CellValue>, GenerationError> {
        let mut values = Vec::with_capacity(rows);
        let mut row_ctx = *ctx;
        for row_index in 0..rows {
            row_ctx.row_index = row_index;
            values.push(self.generate_value(&row_ctx, spec, rng)?);
        }
        Ok(values)
    }
}

/// Generators keyed by the data type they serve.
pub struct GeneratorRegistry {
    generators: BTreeMap<DataType, Box<dyn Generator>>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            generators: BTreeMap::new(),
        };
        primitives::register(&mut registry);
        semantic::register(&mut registry);
        imported::register(&mut registry);
        registry
    }

    pub fn register_generator(&mut self, generator: Box<dyn Generator>) {
        self.generators.insert(generator.data_type(), generator);
    }

    pub fn generator(&self, data_type: DataType) -> Option<&dyn Generator> {
        self.generators.get(&data_type).map(|generator| generator.as_ref())
    }

    pub fn data_types(&self) -> impl Iterator<Item = DataType> + '_ {
        self.generators.keys().copied()
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("data_types", &self.generators.keys().collect::<Vec<_>>())
            .finish()
    }
}

pub(crate) fn spec_mismatch(generator: &dyn Generator, spec: &RangeSpec) -> GenerationError {
    GenerationError::SpecMismatch {
        generator: generator.id(),
        spec: spec.kind(),
    }
}

pub(crate) fn pick<'a, T>(values: &'a [T], rng: &mut dyn rand::RngCore) -> Option<&'a T> {
    use rand::Rng;

    if values.is_empty() {
        return None;
    }
    values.get(rng.random_range(0..values.len()))
}
