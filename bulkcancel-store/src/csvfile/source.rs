use std::path::PathBuf;

use bulkcancel_core::InputRecord;

use crate::store::{RecordSource, StoreError, ID_COLUMN, PERIOD_START_COLUMN};

/// Reads records from a CSV file with a header row.
///
/// Only `POLICYNUMBER` and `PERIODSTART` are used; cells are taken verbatim, so an
/// empty policy number stays empty for the dispatcher to handle.
pub struct CsvRecordSource {
    path: PathBuf,
}

impl CsvRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn csv_err(&self, source: csv::Error) -> StoreError {
        StoreError::Csv {
            path: self.path.clone(),
            source,
        }
    }

    fn column(&self, headers: &csv::StringRecord, name: &str) -> Result<usize, StoreError> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| StoreError::MissingColumn {
                path: self.path.clone(),
                column: name.to_string(),
            })
    }
}

impl RecordSource for CsvRecordSource {
    fn records(&self) -> Result<Vec<InputRecord>, StoreError> {
        let file = std::fs::File::open(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let headers = reader.headers().map_err(|e| self.csv_err(e))?.clone();
        let id_col = self.column(&headers, ID_COLUMN)?;
        let date_col = self.column(&headers, PERIOD_START_COLUMN)?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| self.csv_err(e))?;
            let id = row.get(id_col).unwrap_or_default();
            let period_start = row.get(date_col).unwrap_or_default();
            records.push(InputRecord::from_period_start(id, period_start));
        }
        Ok(records)
    }
}
