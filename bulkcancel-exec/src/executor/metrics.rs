use crate::executor::{Event, EventSink};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Default)]
pub struct BatchMetrics {
    pub run_id: uuid::Uuid,
    pub started_at: Option<Instant>,
    pub finished_at: Option<Instant>,
    pub total_duration: Option<Duration>,
    pub records_total: usize,
    pub records_succeeded: usize,
    pub records_failed: usize,
    pub transport_errors: usize,
    pub missing_ids: usize,
    pub in_flight: usize,
    pub peak_in_flight: usize,
}

impl BatchMetrics {
    pub fn new(run_id: uuid::Uuid) -> Self {
        Self {
            run_id,
            started_at: Some(Instant::now()),
            ..Default::default()
        }
    }

    pub fn record_started(&mut self) {
        self.in_flight += 1;
        self.peak_in_flight = self.peak_in_flight.max(self.in_flight);
    }

    pub fn record_success(&mut self) {
        self.records_succeeded += 1;
        self.record_done();
    }

    pub fn record_failure(&mut self) {
        self.records_failed += 1;
        self.record_done();
    }

    /// Transport errors land in the failed bucket and are also counted on their own.
    pub fn record_transport_error(&mut self) {
        self.transport_errors += 1;
        self.record_failure();
    }

    pub fn record_missing_id(&mut self) {
        self.missing_ids += 1;
    }

    fn record_done(&mut self) {
        self.records_total += 1;
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Instant::now());
        if let (Some(started), Some(finished)) = (self.started_at, self.finished_at) {
            self.total_duration = Some(finished.duration_since(started));
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "run_id": self.run_id.to_string(),
            "duration_ms": self.total_duration.map(|d| d.as_millis() as u64),
            "records": {
                "total": self.records_total,
                "succeeded": self.records_succeeded,
                "failed": self.records_failed,
                "transport_errors": self.transport_errors,
                "missing_ids": self.missing_ids,
            },
            "peak_in_flight": self.peak_in_flight,
        })
    }
}

pub struct MetricsCollector {
    metrics: Arc<Mutex<BatchMetrics>>,
}

impl MetricsCollector {
    pub fn new(run_id: uuid::Uuid) -> Self {
        Self {
            metrics: Arc::new(Mutex::new(BatchMetrics::new(run_id))),
        }
    }

    pub async fn record_started(&self) {
        self.metrics.lock().await.record_started();
    }

    pub async fn record_success(&self) {
        self.metrics.lock().await.record_success();
    }

    pub async fn record_failure(&self) {
        self.metrics.lock().await.record_failure();
    }

    pub async fn record_transport_error(&self) {
        self.metrics.lock().await.record_transport_error();
    }

    pub async fn record_missing_id(&self) {
        self.metrics.lock().await.record_missing_id();
    }

    pub async fn finish(&self) {
        self.metrics.lock().await.finish();
    }

    pub async fn get_metrics(&self) -> BatchMetrics {
        self.metrics.lock().await.clone()
    }
}

pub struct MetricsEventSink {
    collector: Arc<MetricsCollector>,
    base: Arc<dyn EventSink>,
}

impl MetricsEventSink {
    pub fn new(collector: Arc<MetricsCollector>, base: Arc<dyn EventSink>) -> Self {
        Self { collector, base }
    }
}

#[async_trait]
impl EventSink for MetricsEventSink {
    async fn emit(&self, event: Event) {
        match &event {
            Event::RecordStarted { .. } => self.collector.record_started().await,
            Event::RecordSucceeded { .. } => self.collector.record_success().await,
            Event::RecordFailed { .. } => self.collector.record_failure().await,
            Event::RecordTransportError { .. } => self.collector.record_transport_error().await,
            Event::MissingIdentifier { .. } => self.collector.record_missing_id().await,
            Event::BatchFinished { .. } => self.collector.finish().await,
            Event::BatchStarted { .. } => {}
        }

        self.base.emit(event).await;
    }
}
