use std::env;
use std::path::PathBuf;

use csvforge_core::{IndexMode, SchemaFile};
use csvforge_generate::assets::{LexiconHandle, default_lexicon_path, load_lexicon_blocking};
use csvforge_generate::{
    GenerateOptions, GenerationContext, GenerationEngine, GenerationRequest, write_dataset_csv,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut schema_path: Option<PathBuf> = None;
    let mut out_path = PathBuf::from("dataset.csv");
    let mut rows = 10_usize;
    let mut seed: Option<u64> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--schema" => schema_path = args.next().map(PathBuf::from),
            "--out" => out_path = args.next().map(PathBuf::from).ok_or("missing --out path")?,
            "--rows" => rows = args.next().ok_or("missing --rows value")?.parse()?,
            "--seed" => seed = Some(args.next().ok_or("missing --seed value")?.parse()?),
            _ => {
                if schema_path.is_none() {
                    schema_path = Some(PathBuf::from(arg));
                } else {
                    return Err("unexpected argument".into());
                }
            }
        }
    }

    let schema_path = schema_path.ok_or("missing --schema path")?;
    let schema: SchemaFile = serde_json::from_str(&std::fs::read_to_string(&schema_path)?)?;

    let lexicon = LexiconHandle::pending();
    lexicon.resolve(load_lexicon_blocking(&default_lexicon_path()));
    let ctx = GenerationContext::new(&lexicon);

    let request = GenerationRequest::new(schema.columns, rows).with_index(IndexMode::Auto);
    let engine = GenerationEngine::new(GenerateOptions { seed });
    let result = engine.run(&request, &ctx)?;
    let bytes = write_dataset_csv(&out_path, &result.dataset)?;

    println!("wrote {} rows ({bytes} bytes) to {}", result.report.rows, out_path.display());
    Ok(())
}
