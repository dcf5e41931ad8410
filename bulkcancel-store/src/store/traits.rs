use bulkcancel_core::{InputRecord, ResultSet};

use crate::store::types::{StoreError, WrittenReport};

/// Produces the ordered records of one batch.
pub trait RecordSource {
    fn records(&self) -> Result<Vec<InputRecord>, StoreError>;
}

/// Persists a finished batch as two tables, succeeded and failed.
pub trait ReportWriter {
    fn write(&self, results: &ResultSet) -> Result<WrittenReport, StoreError>;
}
