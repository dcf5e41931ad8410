#![forbid(unsafe_code)]

//! Record model, outcome classification and result aggregation for bulk cancellation runs.
//!
//! Nothing here performs I/O; dispatching lives in `bulkcancel-exec` and the tabular
//! boundary in `bulkcancel-store`.

pub mod aggregate;
pub mod classify;
pub mod template;
pub mod types;

pub use crate::aggregate::{aggregate, aggregate_owned};
pub use crate::classify::classify;
pub use crate::template::{BodyEscape, BodyTemplate, TemplateError};
pub use crate::types::{
    HttpResponseParts, InputRecord, Outcome, ReportRow, ResultSet, SENTINEL_ID, TRANSPORT_ERROR_STATUS,
};
