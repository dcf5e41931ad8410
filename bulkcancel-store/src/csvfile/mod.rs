mod report;
mod source;

pub use report::CsvReportWriter;
pub use source::CsvRecordSource;
