use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub enum Event {
    BatchStarted {
        run_id: Uuid,
        total: usize,
        workers: usize,
    },
    BatchFinished {
        run_id: Uuid,
        succeeded: usize,
        failed: usize,
    },
    MissingIdentifier {
        run_id: Uuid,
        seq: usize,
        sentinel: String,
    },
    RecordStarted {
        run_id: Uuid,
        seq: usize,
        id: String,
    },
    RecordSucceeded {
        run_id: Uuid,
        seq: usize,
        id: String,
        status_line: String,
    },
    RecordFailed {
        run_id: Uuid,
        seq: usize,
        id: String,
        status_line: String,
    },
    RecordTransportError {
        run_id: Uuid,
        seq: usize,
        id: String,
        error: String,
    },
}

impl Event {
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::BatchStarted { .. } => "batch.started",
            Event::BatchFinished { .. } => "batch.finished",
            Event::MissingIdentifier { .. } => "record.missing_id",
            Event::RecordStarted { .. } => "record.started",
            Event::RecordSucceeded { .. } => "record.succeeded",
            Event::RecordFailed { .. } => "record.failed",
            Event::RecordTransportError { .. } => "record.transport_error",
        }
    }

    pub fn run_id(&self) -> Uuid {
        match self {
            Event::BatchStarted { run_id, .. }
            | Event::BatchFinished { run_id, .. }
            | Event::MissingIdentifier { run_id, .. }
            | Event::RecordStarted { run_id, .. }
            | Event::RecordSucceeded { run_id, .. }
            | Event::RecordFailed { run_id, .. }
            | Event::RecordTransportError { run_id, .. } => *run_id,
        }
    }

    /// Terminal per-record events; exactly one is emitted for every submitted record.
    pub fn is_record_finished(&self) -> bool {
        matches!(
            self,
            Event::RecordSucceeded { .. }
                | Event::RecordFailed { .. }
                | Event::RecordTransportError { .. }
        )
    }

    pub fn to_json(&self) -> serde_json::Value {
        let ty = self.event_type();
        let run_id = self.run_id().to_string();
        match self {
            Event::BatchStarted { total, workers, .. } => {
                json!({ "type": ty, "run_id": run_id, "total": total, "workers": workers })
            }
            Event::BatchFinished {
                succeeded, failed, ..
            } => {
                json!({ "type": ty, "run_id": run_id, "succeeded": succeeded, "failed": failed })
            }
            Event::MissingIdentifier { seq, sentinel, .. } => {
                json!({ "type": ty, "run_id": run_id, "seq": seq, "sentinel": sentinel })
            }
            Event::RecordStarted { seq, id, .. } => {
                json!({ "type": ty, "run_id": run_id, "seq": seq, "id": id })
            }
            Event::RecordSucceeded {
                seq,
                id,
                status_line,
                ..
            }
            | Event::RecordFailed {
                seq,
                id,
                status_line,
                ..
            } => {
                json!({ "type": ty, "run_id": run_id, "seq": seq, "id": id, "status": status_line })
            }
            Event::RecordTransportError { seq, id, error, .. } => {
                json!({ "type": ty, "run_id": run_id, "seq": seq, "id": id, "error": error })
            }
        }
    }
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: Event);
}

pub struct CompositeEventSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl Default for CompositeEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeEventSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait]
impl EventSink for CompositeEventSink {
    async fn emit(&self, event: Event) {
        for sink in &self.sinks {
            sink.emit(event.clone()).await;
        }
    }
}

/// Writes one JSON object per event to stdout.
pub struct StdoutEventSink;

#[async_trait]
impl EventSink for StdoutEventSink {
    async fn emit(&self, event: Event) {
        println!("{}", serde_json::to_string(&event.to_json()).unwrap_or_default());
    }
}

pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: Event) {}
}
