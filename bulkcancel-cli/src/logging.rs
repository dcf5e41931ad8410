use std::path::Path;

use async_trait::async_trait;
use bulkcancel_exec::executor::{Event, EventSink};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::LogArgs;

/// Installs the global subscriber: stderr plus an optional plain-text log file.
///
/// The returned guard flushes the file writer on drop and must outlive the run.
pub fn init_logging(args: &LogArgs, file_path: Option<&Path>) -> Result<Option<WorkerGuard>, String> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .map_err(|e| format!("invalid log level {:?}: {e}", args.log_level))?;

    let console_level = if args.verbose {
        LevelFilter::TRACE
    } else {
        LevelFilter::WARN
    };
    let stderr_layer = if args.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_filter(console_level)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_filter(console_level)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = file_path {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("create log dir {}: {e}", parent.display()))?;
        let file = std::fs::File::create(path)
            .map_err(|e| format!("create log file {}: {e}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| format!("failed to init logging: {e}"))?;

    Ok(guard)
}

/// Forwards dispatcher events to `tracing`.
///
/// Per-record events are logged at info and stay out of the console layer.
pub struct TracingEventSink;

#[async_trait]
impl EventSink for TracingEventSink {
    async fn emit(&self, event: Event) {
        match event {
            Event::BatchStarted {
                run_id,
                total,
                workers,
            } => info!(%run_id, total, workers, "batch started"),
            Event::MissingIdentifier {
                run_id,
                seq,
                sentinel,
            } => info!(%run_id, seq, %sentinel, "no POLICYNUMBER in input row, using sentinel id"),
            Event::RecordStarted { run_id, seq, id } => info!(%run_id, seq, %id, "sending request"),
            Event::RecordSucceeded {
                run_id,
                seq,
                id,
                status_line,
            } => info!(%run_id, seq, %id, status = %status_line, "request succeeded"),
            Event::RecordFailed {
                run_id,
                seq,
                id,
                status_line,
            } => info!(%run_id, seq, %id, status = %status_line, "request rejected"),
            Event::RecordTransportError {
                run_id,
                seq,
                id,
                error,
            } => info!(%run_id, seq, %id, %error, "request did not complete"),
            Event::BatchFinished {
                run_id,
                succeeded,
                failed,
            } => info!(%run_id, succeeded, failed, "batch finished"),
        }
    }
}
