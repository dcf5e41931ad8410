#![forbid(unsafe_code)]

pub mod csvfile;
pub mod store;

pub use crate::csvfile::{CsvRecordSource, CsvReportWriter};
pub use crate::store::{
    RecordSource, ReportBucket, ReportNaming, ReportWriter, StoreError, WrittenReport,
};
