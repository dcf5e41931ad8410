use std::path::PathBuf;

use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct LogArgs {
    /// Log level (trace/debug/info/warn/error). RUST_LOG takes precedence.
    #[arg(long, default_value = "info")]
    pub log_level: String,
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,
    #[arg(long)]
    pub no_log_file: bool,
    /// Also print log lines below warn to stderr.
    #[arg(long, short)]
    pub verbose: bool,
    #[arg(long)]
    pub log_json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct RequestArgs {
    /// Request config (JSON or YAML). Defaults to ./bulkcancel.yaml when present.
    #[arg(long, env = "BULKCANCEL_CONFIG")]
    pub config: Option<PathBuf>,
    /// Overrides the endpoint from the request config.
    #[arg(long, env = "BULKCANCEL_ENDPOINT")]
    pub endpoint: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct DispatchArgs {
    #[arg(long, default_value_t = bulkcancel_exec::executor::DEFAULT_WORKERS)]
    pub workers: usize,
    /// Extra event output: none or stdout (JSON lines).
    #[arg(long, default_value = "none")]
    pub events: String,
}

#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    #[arg(long, default_value = "logs/results")]
    pub report_dir: PathBuf,
}
