use std::fmt::Display;

use crate::types::{HttpResponseParts, Outcome};

/// Maps one record's transport result to an [`Outcome`].
///
/// Only a completed exchange with status 200 is a success. Every other completed
/// exchange is a failure; an exchange that never completed is a transport error.
pub fn classify<E: Display>(
    seq: usize,
    id: &str,
    result: Result<&HttpResponseParts, E>,
) -> Outcome {
    match result {
        Ok(resp) if resp.is_canonical_success() => Outcome::Success {
            seq,
            id: id.to_string(),
            status_line: resp.status_line(),
            body: resp.body.clone(),
        },
        Ok(resp) => Outcome::Failure {
            seq,
            id: id.to_string(),
            status_line: resp.status_line(),
            body: resp.body.clone(),
        },
        Err(e) => Outcome::TransportError {
            seq,
            id: id.to_string(),
            error: e.to_string(),
        },
    }
}
