use std::path::Path;

use bulkcancel_store::{CsvRecordSource, RecordSource};
use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::utils::redact_url_password;
use crate::{OutputArgs, RequestArgs};

use super::config::{build_request_config, build_request_spec};

#[derive(Serialize)]
struct ValidateResult {
    valid: bool,
    endpoint: String,
    method: String,
    records: usize,
    missing_ids: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    sample_body: Option<String>,
}

/// Checks config and input without sending any request.
pub async fn validate_cmd(input: &Path, output: OutputArgs, request: RequestArgs) -> i32 {
    let spec = match build_request_config(&request).and_then(|cfg| build_request_spec(&cfg)) {
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

    let res = ValidateResult {
        valid: true,
        endpoint: redact_url_password(&spec.endpoint),
        method: spec.method.clone(),
        records: records.len(),
        missing_ids: records.iter().filter(|r| !r.has_id()).count(),
        sample_body: records
            .first()
            .map(|r| spec.body.render(&r.clone().with_sentinel_id())),
    };

    if output.format == OutputFormat::Text && !output.quiet {
        println!("✓ {} is valid", input.display());
        println!("  {} {}", res.method, res.endpoint);
        println!("  Records: {}", res.records);
        if res.missing_ids > 0 {
            println!("  Missing ids: {}", res.missing_ids);
        }
        if let Some(body) = &res.sample_body {
            println!("  Sample body: {body}");
        }
    } else {
        print_result(output.format, output.quiet, &res);
    }
    exit_codes::SUCCESS
}
