//! CLI command implementations.

use std::path::{Path, PathBuf};

use crate::engine::{ClusteringEngine, PermutationGenerator};
use crate::format::{MatrixReader, ResultSummary};
use crate::result::ExportReport;
use crate::types::{load_config, Art2aConfig, Art2aError, Art2aResult, Component};

/// Numeric precision of a clustering run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Single,
    Double,
}

impl Precision {
    /// Parse a precision from its name ("f32"/"single" or "f64"/"double").
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "f32" | "single" | "float" => Some(Self::Single),
            "f64" | "double" => Some(Self::Double),
            _ => None,
        }
    }
}

/// Parameters of the `cluster` command. `None` fields fall back to the config
/// file, then to the defaults.
#[derive(Debug, Clone, Default)]
pub struct ClusterOptions {
    pub config: Option<PathBuf>,
    pub vigilance: Option<f64>,
    pub max_epochs: Option<usize>,
    pub learning_rate: Option<f64>,
    pub seed: u64,
    pub result_log: Option<PathBuf>,
    pub process_log: Option<PathBuf>,
}

impl ClusterOptions {
    /// Merge config file and flags into a validated configuration.
    pub fn resolve_config(&self) -> Art2aResult<Art2aConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => Art2aConfig::default(),
        };
        if let Some(v) = self.vigilance {
            config.vigilance = v;
        }
        if let Some(n) = self.max_epochs {
            config.max_epochs = n;
        }
        if let Some(rate) = self.learning_rate {
            config.learning_rate = rate;
        }
        config.validate()?;
        Ok(config)
    }

    fn export_paths(&self) -> Art2aResult<Option<(&Path, &Path)>> {
        match (&self.result_log, &self.process_log) {
            (Some(r), Some(p)) => Ok(Some((r.as_path(), p.as_path()))),
            (None, None) => Ok(None),
            _ => Err(Art2aError::Config(
                "--result-log and --process-log must be given together".to_string(),
            )),
        }
    }
}

/// Cluster the rows of a matrix file and print a summary.
pub fn cmd_cluster(
    path: &Path,
    precision: Precision,
    options: &ClusterOptions,
    json: bool,
) -> Art2aResult<()> {
    match precision {
        Precision::Single => run_cluster::<f32>(path, options, json),
        Precision::Double => run_cluster::<f64>(path, options, json),
    }
}

fn run_cluster<T: Component>(path: &Path, options: &ClusterOptions, json: bool) -> Art2aResult<()> {
    let config = options.resolve_config()?;
    let export_paths = options.export_paths()?;
    let data = MatrixReader::read_from_file::<T>(path)?;
    log::debug!(
        "Read {} rows from {} ({} precision)",
        data.len(),
        path.display(),
        T::NAME
    );

    let mut engine = ClusteringEngine::new(data, config)?;
    let result = engine.cluster_result(export_paths.is_some(), options.seed)?;
    let summary = ResultSummary::from_result(&result)?;

    let report: Option<ExportReport> = match export_paths {
        Some((result_path, process_path)) => {
            Some(result.export_to_paths(result_path, process_path)?)
        }
        None => None,
    };
    if let Some(report) = &report {
        for failure in &report.failures {
            eprintln!("Warning: export failed: {}", failure);
        }
    }

    if json {
        let out = serde_json::json!({
            "file": path.display().to_string(),
            "seed": options.seed,
            "summary": summary,
            "export": report,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("File: {}", path.display());
        println!("Seed: {}", options.seed);
        for line in summary.to_lines() {
            println!("{}", line);
        }
        if let Some(report) = &report {
            println!(
                "Exported {} result lines and {} process lines",
                report.result_lines, report.process_lines
            );
        }
    }
    Ok(())
}

/// Print the seeded presentation order of `n` inputs for the first epoch.
pub fn cmd_permutation(n: usize, seed: u64, json: bool) -> Art2aResult<()> {
    let order = PermutationGenerator::new(seed).next_permutation(n);
    if json {
        println!(
            "{}",
            serde_json::json!({"n": n, "seed": seed, "permutation": order})
        );
    } else {
        let cells: Vec<String> = order.iter().map(|i| i.to_string()).collect();
        println!("{}", cells.join(" "));
    }
    Ok(())
}
