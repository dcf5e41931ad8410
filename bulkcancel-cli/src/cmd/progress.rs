use async_trait::async_trait;
use bulkcancel_exec::executor::{Event, EventSink};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Single-line stderr progress for text output.
#[derive(Default)]
pub struct ProgressEventSink {
    total: AtomicUsize,
    succeeded: AtomicUsize,
    failed: AtomicUsize,
    running: AtomicUsize,
}

impl ProgressEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn update_progress(&self) {
        let succeeded = self.succeeded.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        let running = self.running.load(Ordering::Relaxed);
        let total = self.total.load(Ordering::Relaxed);
        let done = succeeded + failed;
        let percent = if total > 0 { (done * 100) / total } else { 100 };
        eprint!(
            "\rProgress: [{}/{}] {}% (✓{} ✗{} →{})",
            done, total, percent, succeeded, failed, running
        );
        if done == total {
            eprintln!();
        }
    }

    fn finish_one(&self, counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
        self.running
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |v| Some(v.saturating_sub(1)))
            .ok();
        self.update_progress();
    }
}

#[async_trait]
impl EventSink for ProgressEventSink {
    async fn emit(&self, event: Event) {
        match event {
            Event::BatchStarted { total, .. } => {
                self.total.store(total, Ordering::Relaxed);
                if total == 0 {
                    self.update_progress();
                }
            }
            Event::RecordStarted { .. } => {
                self.running.fetch_add(1, Ordering::Relaxed);
                self.update_progress();
            }
            Event::RecordSucceeded { .. } => self.finish_one(&self.succeeded),
            Event::RecordFailed { .. } | Event::RecordTransportError { .. } => {
                self.finish_one(&self.failed)
            }
            _ => {}
        }
    }
}

pub struct CompositeProgressSink {
    progress: Arc<ProgressEventSink>,
    base: Arc<dyn EventSink>,
}

impl CompositeProgressSink {
    pub fn new(progress: Arc<ProgressEventSink>, base: Arc<dyn EventSink>) -> Self {
        Self { progress, base }
    }
}

#[async_trait]
impl EventSink for CompositeProgressSink {
    async fn emit(&self, event: Event) {
        self.progress.emit(event.clone()).await;
        self.base.emit(event).await;
    }
}
