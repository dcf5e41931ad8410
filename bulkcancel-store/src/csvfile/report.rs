use std::path::{Path, PathBuf};

use bulkcancel_core::{ReportRow, ResultSet};

use crate::store::{ReportBucket, ReportNaming, ReportWriter, StoreError, WrittenReport};

/// Writes the succeeded and failed buckets as two CSV files in one directory.
pub struct CsvReportWriter {
    dir: PathBuf,
    naming: ReportNaming,
}

impl CsvReportWriter {
    pub fn new(dir: impl Into<PathBuf>, naming: ReportNaming) -> Self {
        Self {
            dir: dir.into(),
            naming,
        }
    }

    pub fn path_for(&self, bucket: ReportBucket) -> PathBuf {
        self.dir.join(self.naming.report_file(bucket))
    }

    fn write_table(
        &self,
        path: &Path,
        bucket: ReportBucket,
        rows: impl Iterator<Item = ReportRow>,
    ) -> Result<usize, StoreError> {
        let csv_err = |source| StoreError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
        writer.write_record(bucket.header()).map_err(csv_err)?;

        let mut count = 0;
        for row in rows {
            writer
                .write_record([&row.label, &row.status_line, &row.body])
                .map_err(csv_err)?;
            count += 1;
        }
        writer.flush().map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(count)
    }
}

impl ReportWriter for CsvReportWriter {
    fn write(&self, results: &ResultSet) -> Result<WrittenReport, StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let succeeded_path = self.path_for(ReportBucket::Success);
        let failed_path = self.path_for(ReportBucket::Failure);
        let succeeded_rows =
            self.write_table(&succeeded_path, ReportBucket::Success, results.rows_succeeded())?;
        let failed_rows =
            self.write_table(&failed_path, ReportBucket::Failure, results.rows_failed())?;

        Ok(WrittenReport {
            succeeded_path,
            failed_path,
            succeeded_rows,
            failed_rows,
        })
    }
}
