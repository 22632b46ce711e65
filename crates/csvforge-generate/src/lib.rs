//! Value generation and CSV handling for csvforge.
//!
//! This crate turns a validated column schema into a [`csvforge_core::Dataset`],
//! writes datasets as CSV and reads user CSV files back as imported context.

pub mod assets;
pub mod engine;
pub mod errors;
pub mod generators;
pub mod index;
pub mod infer;
pub mod input;
pub mod model;
pub mod output;
pub mod search;

pub use assets::{Lexicon, LexiconHandle, load_lexicon};
pub use engine::GenerationEngine;
pub use errors::GenerationError;
pub use generators::{GenerationContext, Generator, GeneratorRegistry};
pub use infer::infer_schema;
pub use input::csv::{ImportSummary, ImportedCsv, import_csv, parse};
pub use model::{GenerateOptions, GenerationReport, GenerationRequest, GenerationResult};
pub use output::csv::{escape_csv, serialize, write_dataset_csv};
pub use search::{SearchResult, search_rows};
