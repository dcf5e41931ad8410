use std::path::Path;
use std::sync::Arc;

use bulkcancel_exec::executor::{
    CompositeEventSink, Dispatcher, DispatcherConfig, EventSink, HttpClient, HttpRequestExecutor,
    MetricsCollector, MetricsEventSink, RequestExecutor, ReqwestHttpClient, StdoutEventSink,
};
use bulkcancel_store::{CsvRecordSource, CsvReportWriter, RecordSource, ReportNaming, ReportWriter};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::exit_codes;
use crate::logging::{init_logging, TracingEventSink};
use crate::output::{print_error, print_result, OutputFormat};
use crate::utils::redact_url_password;
use crate::{DispatchArgs, LogArgs, OutputArgs, ReportArgs, RequestArgs};

use super::config::{build_request_config, build_request_spec};
use super::progress::{CompositeProgressSink, ProgressEventSink};

#[derive(Serialize)]
struct RunResult {
    run_id: String,
    records: usize,
    succeeded: usize,
    failed: usize,
    transport_errors: usize,
    missing_ids: usize,
    peak_in_flight: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_ms: Option<u64>,
    success_report: String,
    failure_report: String,
}

pub async fn run_cmd(
    input: &Path,
    output: OutputArgs,
    log: LogArgs,
    request: RequestArgs,
    dispatch: DispatchArgs,
    report: ReportArgs,
) -> i32 {
    let naming = ReportNaming::now();
    let log_path = (!log.no_log_file).then(|| log.log_dir.join(naming.log_file()));
    let _guard = match init_logging(&log, log_path.as_deref()) {
        Ok(g) => g,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let request_cfg = match build_request_config(&request) {
        Ok(c) => c,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::VALIDATION_FAILED;
        }
    };
    let spec = match build_request_spec(&request_cfg) {
        Ok(s) => s,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::VALIDATION_FAILED;
        }
    };

    let records = match CsvRecordSource::new(input).records() {
        Ok(r) => r,
        Err(e) => {
            print_error(output.format, output.quiet, &format!("failed to read input: {e}"));
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let http_client: Arc<dyn HttpClient> = match ReqwestHttpClient::new(request_cfg.timeout()) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let mut sinks = CompositeEventSink::new();
    sinks.add(Box::new(TracingEventSink));
    match dispatch.events.as_str() {
        "none" => {}
        "stdout" => sinks.add(Box::new(StdoutEventSink)),
        other => {
            print_error(
                output.format,
                output.quiet,
                &format!("unknown event sink: {other} (expected none or stdout)"),
            );
            return exit_codes::VALIDATION_FAILED;
        }
    }
    let logged: Arc<dyn EventSink> = Arc::new(sinks);

    let show_progress = output.format == OutputFormat::Text && !output.quiet;
    let with_progress: Arc<dyn EventSink> = if show_progress {
        Arc::new(CompositeProgressSink::new(
            Arc::new(ProgressEventSink::new()),
            logged,
        ))
    } else {
        logged
    };

    let run_id = Uuid::new_v4();
    let metrics = Arc::new(MetricsCollector::new(run_id));
    let event_sink: Arc<dyn EventSink> =
        Arc::new(MetricsEventSink::new(metrics.clone(), with_progress));

    info!(
        %run_id,
        input = %input.display(),
        endpoint = %redact_url_password(&spec.endpoint),
        method = %spec.method,
        records = records.len(),
        workers = dispatch.workers,
        "starting run"
    );

    let executor: Arc<dyn RequestExecutor> = Arc::new(HttpRequestExecutor::new(http_client, spec));
    let dispatcher = match Dispatcher::new(
        DispatcherConfig {
            workers: dispatch.workers,
        },
        executor,
        event_sink,
    ) {
        Ok(d) => d,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::VALIDATION_FAILED;
        }
    };

    let results = dispatcher.run_batch(run_id, records).await;

    let writer = CsvReportWriter::new(&report.report_dir, naming);
    let written = match writer.write(&results) {
        Ok(w) => w,
        Err(e) => {
            print_error(output.format, output.quiet, &format!("failed to write report: {e}"));
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let m = metrics.get_metrics().await;
    let res = RunResult {
        run_id: run_id.to_string(),
        records: results.len(),
        succeeded: results.succeeded.len(),
        failed: results.failed.len(),
        transport_errors: results.transport_errors(),
        missing_ids: m.missing_ids,
        peak_in_flight: m.peak_in_flight,
        duration_ms: m.total_duration.map(|d| d.as_millis() as u64),
        success_report: written.succeeded_path.display().to_string(),
        failure_report: written.failed_path.display().to_string(),
    };
    info!(
        %run_id,
        succeeded = res.succeeded,
        failed = res.failed,
        success_report = %res.success_report,
        failure_report = %res.failure_report,
        "run completed"
    );

    if output.format == OutputFormat::Text && !output.quiet {
        println!("Run {} completed", res.run_id);
        println!("  Records: {}", res.records);
        println!("  Succeeded: {}", res.succeeded);
        println!("  Failed: {} ({} transport errors)", res.failed, res.transport_errors);
        if res.missing_ids > 0 {
            println!("  Missing ids replaced: {}", res.missing_ids);
        }
        println!("  {}", res.success_report);
        println!("  {}", res.failure_report);
    } else {
        print_result(output.format, output.quiet, &res);
    }

    if res.failed > 0 {
        exit_codes::RUN_FAILED
    } else {
        exit_codes::SUCCESS
    }
}
