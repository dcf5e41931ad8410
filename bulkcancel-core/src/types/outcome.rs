use serde::Serialize;

/// Text written in the status column for requests that never completed.
pub const TRANSPORT_ERROR_STATUS: &str = "transport error";

/// Classified result of one record's outbound request.
///
/// `seq` is the record's zero-based submission index within its batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success {
        seq: usize,
        id: String,
        status_line: String,
        body: Vec<u8>,
    },
    Failure {
        seq: usize,
        id: String,
        status_line: String,
        body: Vec<u8>,
    },
    TransportError {
        seq: usize,
        id: String,
        error: String,
    },
}

impl Outcome {
    pub fn seq(&self) -> usize {
        match self {
            Outcome::Success { seq, .. }
            | Outcome::Failure { seq, .. }
            | Outcome::TransportError { seq, .. } => *seq,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Outcome::Success { id, .. }
            | Outcome::Failure { id, .. }
            | Outcome::TransportError { id, .. } => id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn to_row(&self) -> ReportRow {
        match self {
            Outcome::Success {
                id,
                status_line,
                body,
                ..
            }
            | Outcome::Failure {
                id,
                status_line,
                body,
                ..
            } => ReportRow {
                label: id.clone(),
                status_line: status_line.clone(),
                body: String::from_utf8_lossy(body).into_owned(),
            },
            Outcome::TransportError { id, error, .. } => ReportRow {
                label: id.clone(),
                status_line: TRANSPORT_ERROR_STATUS.to_string(),
                body: error.clone(),
            },
        }
    }
}

/// One line of a tabular report: the original id, the status line and the stringified body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub label: String,
    pub status_line: String,
    pub body: String,
}
