mod outcome;
mod record;
mod response;
mod result_set;

pub use outcome::{Outcome, ReportRow, TRANSPORT_ERROR_STATUS};
pub use record::{InputRecord, SENTINEL_ID};
pub use response::HttpResponseParts;
pub use result_set::ResultSet;
