//! File-level compression pipeline.
//!
//! Reads an input file, finds repeats with each configured strategy, builds a
//! dictionary, compresses, and writes `encoding_<strategy>.txt` and
//! `compressed_<strategy>.txt` into the output directory.

use crate::dictionary::{CompressionStats, DictionaryConfig, EncodingDictionary};
use crate::error::{Error, Result};
use crate::matcher::Strategy;
use crate::repeats::find_repeats;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Minimum substring length scanned unless configured otherwise.
pub const DEFAULT_MIN_LENGTH: usize = 3;

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Text to compress
    pub input: PathBuf,
    /// Directory receiving the dictionary and compressed files
    pub output_dir: PathBuf,
    /// Shortest repeated substring considered
    pub min_length: usize,
    /// One run per strategy, in order
    pub strategies: Vec<Strategy>,
    pub dictionary: DictionaryConfig,
    /// Treat a missing input file as empty text instead of failing
    pub allow_missing_input: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input.txt"),
            output_dir: PathBuf::from("."),
            min_length: DEFAULT_MIN_LENGTH,
            strategies: vec![Strategy::Naive, Strategy::default()],
            dictionary: DictionaryConfig::default(),
            allow_missing_input: false,
        }
    }
}

/// Outcome of one strategy's run.
#[derive(Debug, Clone)]
pub struct StrategyReport {
    pub strategy: Strategy,
    /// Time spent finding repeats
    pub elapsed: Duration,
    pub repeats: usize,
    pub stats: CompressionStats,
    pub dictionary_path: PathBuf,
    pub compressed_path: PathBuf,
}

/// Outcome of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub original_size: usize,
    pub runs: Vec<StrategyReport>,
}

/// Runs the pipeline described by `config`.
pub fn run(config: &PipelineConfig) -> Result<PipelineReport> {
    let text = read_input(&config.input, config.allow_missing_input)?;
    info!(
        input = %config.input.display(),
        bytes = text.len(),
        "read input"
    );

    fs::create_dir_all(&config.output_dir)?;

    let mut runs = Vec::with_capacity(config.strategies.len());
    for strategy in &config.strategies {
        runs.push(run_strategy(&text, strategy, config)?);
    }

    Ok(PipelineReport {
        original_size: text.len(),
        runs,
    })
}

fn run_strategy(
    text: &[u8],
    strategy: &Strategy,
    config: &PipelineConfig,
) -> Result<StrategyReport> {
    let start = Instant::now();
    let repeats = find_repeats(text, config.min_length, strategy)?;
    let elapsed = start.elapsed();

    let dictionary = EncodingDictionary::build(&repeats, &config.dictionary);
    let compressed = dictionary.compress(text);
    let stats = dictionary.stats(text, &compressed);

    let dictionary_path = config
        .output_dir
        .join(format!("encoding_{}.txt", strategy.name()));
    let compressed_path = config
        .output_dir
        .join(format!("compressed_{}.txt", strategy.name()));

    dictionary.write_to(BufWriter::new(File::create(&dictionary_path)?))?;
    fs::write(&compressed_path, &compressed)?;

    info!(
        strategy = %strategy,
        ?elapsed,
        repeats = repeats.len(),
        compressed = stats.compressed_len,
        "strategy finished"
    );

    Ok(StrategyReport {
        strategy: *strategy,
        elapsed,
        repeats: repeats.len(),
        stats,
        dictionary_path,
        compressed_path,
    })
}

/// Reads the whole input file.
///
/// A missing file is an error unless `allow_missing` is set, in which case it
/// reads as empty text.
pub fn read_input(path: &Path, allow_missing: bool) -> Result<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            if allow_missing {
                warn!(input = %path.display(), "input file missing, using empty text");
                Ok(Vec::new())
            } else {
                Err(Error::InputNotFound {
                    path: path.to_path_buf(),
                })
            }
        }
        Err(e) => Err(e.into()),
    }
}
