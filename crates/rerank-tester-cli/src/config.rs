use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use rerank_tester_rerank::CohereRerankConfig;
use thiserror::Error;

pub const API_KEY_ENV: &str = "RERANK_TESTER_API_KEY";
pub const COHERE_API_KEY_ENV: &str = "COHERE_API_KEY";
pub const MODEL_ENV: &str = "RERANK_TESTER_MODEL";
pub const ENDPOINT_ENV: &str = "RERANK_TESTER_ENDPOINT";
pub const TIMEOUT_ENV: &str = "RERANK_TESTER_TIMEOUT_SECS";

#[derive(Parser)]
#[command(
    name = "rerank-tester",
    version,
    about = "Rerank (query, documents) rows from a spreadsheet and export the scores as CSV"
)]
pub struct Cli {
    /// Spreadsheet with `query` and `documents` columns (.xlsx, .xls, .ods or .csv)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Rerank API key (default: $RERANK_TESTER_API_KEY, then $COHERE_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Rerank model (default: $RERANK_TESTER_MODEL or rerank-english-v2.0)
    #[arg(long)]
    pub model: Option<String>,

    /// Rerank endpoint URL (default: $RERANK_TESTER_ENDPOINT or Cohere v1)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Per-request timeout in seconds (default: $RERANK_TESTER_TIMEOUT_SECS or 30)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Rows allowed in flight at once
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Directory for the timestamped results file
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Exact results file path, overrides --out-dir
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Input rows to preview before running
    #[arg(long, default_value_t = 5)]
    pub preview_rows: usize,

    /// Result rows to show after running
    #[arg(long, default_value_t = 20)]
    pub show: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no API key: pass --api-key or set RERANK_TESTER_API_KEY or COHERE_API_KEY")]
    MissingApiKey,
    #[error("RERANK_TESTER_TIMEOUT_SECS must be a whole number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Timestamped file name inside this directory.
    Dir(PathBuf),
    File(PathBuf),
}

/// Fully resolved settings for one run. `Debug` never shows the key.
#[derive(Debug, Clone)]
pub struct Settings {
    pub input: PathBuf,
    pub rerank: CohereRerankConfig,
    pub concurrency: usize,
    pub output: OutputTarget,
    pub preview_rows: usize,
    pub show: usize,
}

impl Settings {
    pub fn from_env(cli: Cli) -> Result<Self, ConfigError> {
        Self::resolve(cli, |name| std::env::var(name).ok())
    }

    /// Flags win over environment variables; blank values count as unset.
    pub fn resolve(
        cli: Cli,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let lookup = |name: &str| {
            env(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let non_blank = |v: Option<String>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };

        let api_key = non_blank(cli.api_key)
            .or_else(|| lookup(API_KEY_ENV))
            .or_else(|| lookup(COHERE_API_KEY_ENV))
            .ok_or(ConfigError::MissingApiKey)?;

        let mut rerank = CohereRerankConfig::new(api_key);
        if let Some(model) = non_blank(cli.model).or_else(|| lookup(MODEL_ENV)) {
            rerank.model = model;
        }
        if let Some(endpoint) = non_blank(cli.endpoint).or_else(|| lookup(ENDPOINT_ENV)) {
            rerank.endpoint = endpoint;
        }
        let timeout_secs = match cli.timeout_secs {
            Some(secs) => Some(secs),
            None => lookup(TIMEOUT_ENV)
                .map(|raw| raw.parse::<u64>().map_err(|_| ConfigError::InvalidTimeout(raw)))
                .transpose()?,
        };
        if let Some(secs) = timeout_secs {
            rerank.timeout = Duration::from_secs(secs);
        }

        let output = match cli.output {
            Some(path) => OutputTarget::File(path),
            None => OutputTarget::Dir(cli.out_dir),
        };

        Ok(Self {
            input: cli.input,
            rerank,
            concurrency: cli.concurrency.max(1),
            output,
            preview_rows: cli.preview_rows,
            show: cli.show,
        })
    }
}
