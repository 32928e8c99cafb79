use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use numseq_core::{load_or_build, Digit, ErrorInfo, SeqError};
use numseq_corpus::{corpus_fingerprint, idx, JsonGroupStore};
use numseq_engine::{GlyphTransform, SequenceGenerator, SpacingRange};

use crate::config::RunConfig;
use crate::writer;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Digit sequence to render, e.g. 301.
    #[arg(long)]
    pub digits: String,
    /// Minimum gap width in pixels.
    #[arg(long)]
    pub min: usize,
    /// Maximum gap width in pixels.
    #[arg(long)]
    pub max: usize,
    /// Output image width in pixels.
    #[arg(long)]
    pub width: usize,
    /// Path to the IDX images file (decompressed ubyte).
    #[arg(long)]
    pub images: PathBuf,
    /// Path to the IDX labels file (decompressed ubyte).
    #[arg(long)]
    pub labels: PathBuf,
    /// Optional JSON run configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Master seed for deterministic output.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    /// Directory holding cached label groupings.
    #[arg(long, default_value = "cache")]
    pub cache_dir: PathBuf,
    /// Output directory for the rendered image.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

pub fn run(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let run_config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    let digits = parse_digits(&args.digits)?;
    let range = SpacingRange::new(args.min, args.max)?;

    let corpus = idx::load_corpus(&args.images, &args.labels)?;
    let fingerprint = corpus_fingerprint(&corpus);
    let store = JsonGroupStore::new(&args.cache_dir);
    let groups = load_or_build(&store, &fingerprint, &corpus)?;

    let mut generator = SequenceGenerator::new(corpus, groups, run_config.spacing, args.seed);
    if run_config.image.transform {
        // Stand-in for an external filter pipeline: intensity inversion,
        // which exercises the per-glyph renormalization path.
        let invert: GlyphTransform = Box::new(|glyph| glyph.map(|v| 1.0 - v));
        generator = generator.with_transform(invert);
    }

    let image = generator.generate(&digits, range, args.width)?;

    fs::create_dir_all(&args.out)?;
    let path = writer::save_sequence(&image, &digits, run_config.output_format, &args.out)?;
    println!("saved {}", path.display());
    Ok(())
}

fn parse_digits(raw: &str) -> Result<Vec<Digit>, SeqError> {
    if raw.is_empty() {
        return Err(SeqError::InvalidConfiguration(ErrorInfo::new(
            "empty-digit-sequence",
            "at least one digit is required",
        )));
    }
    raw.chars()
        .map(|ch| {
            let value = ch.to_digit(10).ok_or_else(|| {
                SeqError::InvalidConfiguration(
                    ErrorInfo::new("digit-parse", "digit sequences contain only characters 0-9")
                        .with_context("character", ch.to_string()),
                )
            })?;
            Digit::new(value as u8)
        })
        .collect()
}
