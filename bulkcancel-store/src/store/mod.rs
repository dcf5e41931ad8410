mod traits;
mod types;

pub use traits::{RecordSource, ReportWriter};
pub use types::{
    ReportBucket, ReportNaming, StoreError, WrittenReport, ID_COLUMN, PERIOD_START_COLUMN,
};
