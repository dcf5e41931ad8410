use std::path::PathBuf;

use chrono::{DateTime, Local, TimeZone};

/// Column holding the policy number in the input file.
pub const ID_COLUMN: &str = "POLICYNUMBER";
/// Column holding the `MM/DD/YYYY` cancellation-effective date.
pub const PERIOD_START_COLUMN: &str = "PERIODSTART";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{path} has no {column} column")]
    MissingColumn { path: PathBuf, column: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportBucket {
    Success,
    Failure,
}

impl ReportBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportBucket::Success => "Success",
            ReportBucket::Failure => "Failure",
        }
    }

    /// Header row: the label column is named after the bucket.
    pub fn header(&self) -> [&'static str; 3] {
        [self.as_str(), "Response", "Content"]
    }
}

/// Timestamped names for the run's log and report files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportNaming {
    stamp: String,
}

impl ReportNaming {
    pub const REPORT_PREFIX: &'static str = "policyCancellationResults_";
    pub const LOG_PREFIX: &'static str = "policyCancellationLogs_";

    pub fn now() -> Self {
        Self::at(&Local::now())
    }

    pub fn at<Tz: TimeZone>(ts: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self::with_stamp(ts.format("%Y%m%d-%H%M%S").to_string())
    }

    pub fn with_stamp(stamp: impl Into<String>) -> Self {
        Self {
            stamp: stamp.into(),
        }
    }

    pub fn stamp(&self) -> &str {
        &self.stamp
    }

    pub fn report_file(&self, bucket: ReportBucket) -> String {
        format!("{}{}_{}.csv", Self::REPORT_PREFIX, bucket.as_str(), self.stamp)
    }

    pub fn log_file(&self) -> String {
        format!("{}{}.txt", Self::LOG_PREFIX, self.stamp)
    }
}

/// Where a finished report ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub succeeded_path: PathBuf,
    pub failed_path: PathBuf,
    pub succeeded_rows: usize,
    pub failed_rows: usize,
}
