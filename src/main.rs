use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use rollscan::pipeline::{self, PipelineConfig, DEFAULT_MIN_LENGTH};
use rollscan::timing::{builtin_scenarios, compare, comparison_strategies, time_runs};
use rollscan::{find_all, find_repeats, DictionaryConfig, HashParams, Result, Strategy};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "rollscan", version)]
#[command(about = "Naive vs Rabin-Karp substring search and repeat-driven compression")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Naive,
    RabinKarp,
}

#[derive(Args, Clone)]
struct StrategyArgs {
    /// Matching strategy
    #[arg(long, value_enum, default_value_t = StrategyArg::RabinKarp)]
    strategy: StrategyArg,
    /// Prime modulus for the rolling hash
    #[arg(long, default_value_t = HashParams::DEFAULT_MODULUS)]
    prime: u64,
}

impl StrategyArgs {
    fn strategy(&self) -> Result<Strategy> {
        match self.strategy {
            StrategyArg::Naive => Ok(Strategy::Naive),
            StrategyArg::RabinKarp => Strategy::rabin_karp(self.prime),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Find every occurrence of a pattern in a file
    Search {
        /// File to search
        input: PathBuf,
        /// Pattern to look for
        pattern: String,
        #[command(flatten)]
        strategy: StrategyArgs,
        /// Average timing over this many runs
        #[arg(long, default_value_t = 1)]
        iterations: u32,
    },
    /// List substrings occurring more than once
    Repeats {
        /// File to scan
        input: PathBuf,
        /// Minimum substring length
        #[arg(long, default_value_t = DEFAULT_MIN_LENGTH)]
        min_length: usize,
        #[command(flatten)]
        strategy: StrategyArgs,
        /// Show only the N most frequent repeats
        #[arg(long)]
        top: Option<usize>,
    },
    /// Compress a file with both strategies and write dictionaries
    Compress {
        /// File to compress
        #[arg(default_value = "input.txt")]
        input: PathBuf,
        /// Directory for dictionary and compressed files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
        /// Minimum substring length
        #[arg(long, default_value_t = DEFAULT_MIN_LENGTH)]
        min_length: usize,
        /// Prime modulus for the Rabin-Karp run
        #[arg(long, default_value_t = HashParams::DEFAULT_MODULUS)]
        prime: u64,
        /// Token prefix
        #[arg(long, default_value = rollscan::DEFAULT_TOKEN_PREFIX)]
        prefix: String,
        /// Treat a missing input file as empty text
        #[arg(long)]
        allow_missing_input: bool,
    },
    /// Time naive and Rabin-Karp matching on the built-in scenarios
    Compare {
        /// Runs per strategy and scenario
        #[arg(long, default_value_t = 1000)]
        iterations: u32,
    },
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_search(input: &Path, pattern: &str, args: &StrategyArgs, iterations: u32) -> Result<()> {
    let text = fs::read(input)?;
    let strategy = args.strategy()?;
    let matches = find_all(&text, pattern.as_bytes(), &strategy)?;

    let (total, _) = time_runs(iterations, || find_all(&text, pattern.as_bytes(), &strategy));

    println!("{strategy}:");
    println!("Matches: {}", matches.len());
    for offset in &matches {
        println!("  {offset}");
    }
    println!(
        "Execution time: {:.9} seconds",
        total.as_secs_f64() / iterations.max(1) as f64
    );
    Ok(())
}

fn cmd_repeats(
    input: &Path,
    min_length: usize,
    args: &StrategyArgs,
    top: Option<usize>,
) -> Result<()> {
    let text = fs::read(input)?;
    let strategy = args.strategy()?;
    let repeats = find_repeats(&text, min_length, &strategy)?;

    println!("{strategy}: {} repeated substrings", repeats.len());
    let ranked = repeats.by_frequency();
    let limit = top.unwrap_or(ranked.len());
    for (substring, count) in ranked.into_iter().take(limit) {
        println!("{:>8}  {:?}", count, String::from_utf8_lossy(substring));
    }
    Ok(())
}

fn cmd_compress(config: PipelineConfig) -> Result<()> {
    let report = pipeline::run(&config)?;

    println!("Original file size: {} bytes\n", report.original_size);
    for run in &report.runs {
        println!("{}:", run.strategy);
        println!("Time taken: {:.6} seconds", run.elapsed.as_secs_f64());
        println!("Repeated substrings: {}", run.repeats);
        println!(
            "Compressed text written to '{}'",
            run.compressed_path.display()
        );
        println!(
            "Compressed file size: {} bytes ({:.2}%)",
            run.stats.compressed_len,
            run.stats.compression_ratio()
        );
        println!(
            "Encoding dictionary written to '{}'\n",
            run.dictionary_path.display()
        );
    }
    Ok(())
}

fn cmd_compare(iterations: u32) -> Result<()> {
    let strategies = comparison_strategies()?;

    for scenario in builtin_scenarios() {
        println!(
            "{}: pattern = {} iterations = {}",
            scenario.name,
            String::from_utf8_lossy(&scenario.pattern),
            iterations
        );
        for m in compare(&scenario, &strategies, iterations)? {
            println!("{}:", m.strategy);
            println!("Execution time: {:.9} seconds", m.average().as_secs_f64());
            println!("Matches: {}\n", m.matches);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn init_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("warning: tracing subscriber already installed");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = match &cli.command {
        Commands::Search {
            input,
            pattern,
            strategy,
            iterations,
        } => cmd_search(input, pattern, strategy, *iterations),
        Commands::Repeats {
            input,
            min_length,
            strategy,
            top,
        } => cmd_repeats(input, *min_length, strategy, *top),
        Commands::Compress {
            input,
            output_dir,
            min_length,
            prime,
            prefix,
            allow_missing_input,
        } => Strategy::rabin_karp(*prime).and_then(|rabin_karp| {
            cmd_compress(PipelineConfig {
                input: input.clone(),
                output_dir: output_dir.clone(),
                min_length: *min_length,
                strategies: vec![Strategy::Naive, rabin_karp],
                dictionary: DictionaryConfig {
                    token_prefix: prefix.clone(),
                },
                allow_missing_input: *allow_missing_input,
            })
        }),
        Commands::Compare { iterations } => cmd_compare(*iterations),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
