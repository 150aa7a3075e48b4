//! CLI entry point for the `art2a` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use art2a_cluster::cli::commands::{self, ClusterOptions, Precision};
use art2a_cluster::{Art2aError, DEFAULT_SEED};

#[derive(Parser)]
#[command(
    name = "art2a",
    about = "ART-2A clustering of non-negative feature vectors"
)]
struct Cli {
    /// Output format: "text" (default) or "json"
    #[arg(long, default_value = "text")]
    format: String,

    /// Log debug output to stderr (otherwise RUST_LOG, default warn)
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cluster the rows of a matrix file
    Cluster {
        /// Path to the matrix file (one row per line, comma or whitespace separated)
        file: PathBuf,
        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Vigilance parameter in (0, 1)
        #[arg(long)]
        vigilance: Option<f64>,
        /// Maximum number of epochs
        #[arg(long)]
        max_epochs: Option<usize>,
        /// Learning rate in (0, 1]
        #[arg(long)]
        learning_rate: Option<f64>,
        /// Seed for the epoch permutations
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        /// Numeric precision: f32 or f64
        #[arg(long, default_value = "f64")]
        precision: String,
        /// Write the result log to this file (requires --process-log)
        #[arg(long)]
        result_log: Option<PathBuf>,
        /// Write the process log to this file (requires --result-log)
        #[arg(long)]
        process_log: Option<PathBuf>,
    },
    /// Print the seeded first-epoch presentation order for n inputs
    Permutation {
        /// Number of inputs
        n: usize,
        /// Seed for the permutation
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn main() {
    let cli = Cli::parse();
    let json = cli.format == "json";

    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Cluster {
            file,
            config,
            vigilance,
            max_epochs,
            learning_rate,
            seed,
            precision,
            result_log,
            process_log,
        } => {
            let precision = match Precision::from_name(&precision) {
                Some(p) => p,
                None => {
                    eprintln!("Invalid precision: {}", precision);
                    process::exit(3);
                }
            };
            let options = ClusterOptions {
                config,
                vigilance,
                max_epochs,
                learning_rate,
                seed,
                result_log,
                process_log,
            };
            commands::cmd_cluster(&file, precision, &options, json)
        }
        Commands::Permutation { n, seed } => commands::cmd_permutation(n, seed, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let code = match &e {
            Art2aError::Io(_) => 1,
            Art2aError::Parse { .. } | Art2aError::Json(_) => 2,
            Art2aError::ConvergenceFailure { .. } => 4,
            e if e.is_configuration_error() => 3,
            _ => 5,
        };
        process::exit(code);
    }
}
