#![forbid(unsafe_code)]

//! Dispatch engine for bulk cancellation runs.
//!
//! One request per record, at most `workers` in flight, one classified outcome per record.

pub mod executor;

pub use crate::executor::{
    Dispatcher, DispatcherConfig, HttpRequestExecutor, RequestExecutor, RequestSpec,
};
