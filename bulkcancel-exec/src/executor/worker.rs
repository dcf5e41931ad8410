use std::sync::Arc;

use async_trait::async_trait;
use bulkcancel_core::{classify, HttpResponseParts, InputRecord, Outcome};
use uuid::Uuid;

use crate::executor::concurrency::WorkerPermit;
use crate::executor::events::{Event, EventSink};
use crate::executor::http::{HttpClient, HttpError};
use crate::executor::request::RequestSpec;

/// Performs the single outbound call for one record.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self, record: &InputRecord) -> Result<HttpResponseParts, HttpError>;
}

pub struct HttpRequestExecutor {
    http: Arc<dyn HttpClient>,
    spec: RequestSpec,
}

impl HttpRequestExecutor {
    pub fn new(http: Arc<dyn HttpClient>, spec: RequestSpec) -> Self {
        Self { http, spec }
    }
}

#[async_trait]
impl RequestExecutor for HttpRequestExecutor {
    async fn execute(&self, record: &InputRecord) -> Result<HttpResponseParts, HttpError> {
        self.http.send(self.spec.build(record)).await
    }
}

pub struct RecordContext {
    pub run_id: Uuid,
    pub seq: usize,
    pub record: InputRecord,
}

pub struct RecordDeps {
    pub executor: Arc<dyn RequestExecutor>,
    pub event_sink: Arc<dyn EventSink>,
}

/// Runs one record to its outcome. Holds `_permit` until the outcome is classified.
pub async fn run_record(ctx: RecordContext, deps: RecordDeps, _permit: WorkerPermit) -> Outcome {
    deps.event_sink
        .emit(Event::RecordStarted {
            run_id: ctx.run_id,
            seq: ctx.seq,
            id: ctx.record.id.clone(),
        })
        .await;

    let sent = deps.executor.execute(&ctx.record).await;
    let outcome = classify(ctx.seq, &ctx.record.id, sent.as_ref());

    deps.event_sink.emit(finished_event(ctx.run_id, &outcome)).await;
    outcome
}

pub(crate) fn finished_event(run_id: Uuid, outcome: &Outcome) -> Event {
    match outcome {
        Outcome::Success {
            seq,
            id,
            status_line,
            ..
        } => Event::RecordSucceeded {
            run_id,
            seq: *seq,
            id: id.clone(),
            status_line: status_line.clone(),
        },
        Outcome::Failure {
            seq,
            id,
            status_line,
            ..
        } => Event::RecordFailed {
            run_id,
            seq: *seq,
            id: id.clone(),
            status_line: status_line.clone(),
        },
        Outcome::TransportError { seq, id, error } => Event::RecordTransportError {
            run_id,
            seq: *seq,
            id: id.clone(),
            error: error.clone(),
        },
    }
}
