use crate::types::outcome::{Outcome, ReportRow};

/// Final partition of a batch: `succeeded` holds only `Success`, `failed` holds the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    pub succeeded: Vec<Outcome>,
    pub failed: Vec<Outcome>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.succeeded.is_empty() && self.failed.is_empty()
    }

    pub fn transport_errors(&self) -> usize {
        self.failed
            .iter()
            .filter(|o| matches!(o, Outcome::TransportError { .. }))
            .count()
    }

    pub fn rows_succeeded(&self) -> impl Iterator<Item = ReportRow> + '_ {
        self.succeeded.iter().map(Outcome::to_row)
    }

    pub fn rows_failed(&self) -> impl Iterator<Item = ReportRow> + '_ {
        self.failed.iter().map(Outcome::to_row)
    }
}
