pub mod concurrency;
mod dispatcher;
pub mod events;
pub mod http;
pub mod metrics;
pub mod request;
mod result;
mod types;
pub mod worker;

pub use concurrency::{WorkerPermit, WorkerPool};
pub use dispatcher::Dispatcher;
pub use events::{CompositeEventSink, Event, EventSink, NoOpEventSink, StdoutEventSink};
pub use http::{HttpClient, HttpError, HttpRequestParts, ReqwestHttpClient};
pub use metrics::{BatchMetrics, MetricsCollector, MetricsEventSink};
pub use request::{RequestConfig, RequestSpec, RequestSpecError};
pub use result::DispatchError;
pub use types::{DispatcherConfig, DEFAULT_WORKERS};
pub use worker::{HttpRequestExecutor, RequestExecutor};
