use std::sync::Arc;

use bulkcancel_core::{aggregate_owned, InputRecord, Outcome, ResultSet, SENTINEL_ID};
use futures_util::stream::{FuturesUnordered, StreamExt};
use tokio::task::JoinError;
use uuid::Uuid;

use crate::executor::concurrency::WorkerPool;
use crate::executor::events::{Event, EventSink};
use crate::executor::result::DispatchError;
use crate::executor::types::DispatcherConfig;
use crate::executor::worker::{finished_event, run_record, RecordContext, RecordDeps, RequestExecutor};

type Joined = (usize, String, Result<Outcome, JoinError>);

/// Fans records out over a fixed-size worker pool and collects one outcome per record.
pub struct Dispatcher {
    config: DispatcherConfig,
    executor: Arc<dyn RequestExecutor>,
    event_sink: Arc<dyn EventSink>,
}

impl Dispatcher {
    pub fn new(
        config: DispatcherConfig,
        executor: Arc<dyn RequestExecutor>,
        event_sink: Arc<dyn EventSink>,
    ) -> Result<Self, DispatchError> {
        if config.workers == 0 {
            return Err(DispatchError::NoWorkers);
        }
        Ok(Self {
            config,
            executor,
            event_sink,
        })
    }

    /// Executes every record and returns their outcomes in completion order.
    ///
    /// Returns only after all records are resolved. A record's `seq` in its outcome is
    /// its position in `records`.
    pub async fn run<I>(&self, run_id: Uuid, records: I) -> Vec<Outcome>
    where
        I: IntoIterator<Item = InputRecord>,
    {
        let records: Vec<InputRecord> = records.into_iter().collect();
        let total = records.len();
        let pool = WorkerPool::new(self.config.workers);

        self.event_sink
            .emit(Event::BatchStarted {
                run_id,
                total,
                workers: pool.size(),
            })
            .await;

        let mut pending = FuturesUnordered::new();
        let mut outcomes = Vec::with_capacity(total);

        for (seq, record) in records.into_iter().enumerate() {
            let record = self.admit(run_id, seq, record).await;

            // Keep draining finished records while waiting for a slot so arrival order holds.
            let permit = loop {
                tokio::select! {
                    biased;
                    Some(joined) = pending.next(), if !pending.is_empty() => {
                        outcomes.push(self.settle(run_id, joined).await);
                    }
                    permit = pool.acquire() => break permit,
                }
            };

            let id = record.id.clone();
            let ctx = RecordContext {
                run_id,
                seq,
                record,
            };
            let deps = RecordDeps {
                executor: self.executor.clone(),
                event_sink: self.event_sink.clone(),
            };
            let handle = tokio::spawn(run_record(ctx, deps, permit));
            pending.push(async move { (seq, id, handle.await) });
        }

        while let Some(joined) = pending.next().await {
            outcomes.push(self.settle(run_id, joined).await);
        }

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        self.event_sink
            .emit(Event::BatchFinished {
                run_id,
                succeeded,
                failed: outcomes.len() - succeeded,
            })
            .await;

        outcomes
    }

    /// [`Dispatcher::run`] followed by aggregation into succeeded and failed buckets.
    pub async fn run_batch<I>(&self, run_id: Uuid, records: I) -> ResultSet
    where
        I: IntoIterator<Item = InputRecord>,
    {
        aggregate_owned(self.run(run_id, records).await)
    }

    async fn admit(&self, run_id: Uuid, seq: usize, record: InputRecord) -> InputRecord {
        if record.has_id() {
            return record;
        }
        self.event_sink
            .emit(Event::MissingIdentifier {
                run_id,
                seq,
                sentinel: SENTINEL_ID.to_string(),
            })
            .await;
        record.with_sentinel_id()
    }

    async fn settle(&self, run_id: Uuid, (seq, id, joined): Joined) -> Outcome {
        match joined {
            Ok(outcome) => outcome,
            Err(e) => {
                // The worker never reported; account for the record here instead.
                let outcome = Outcome::TransportError {
                    seq,
                    id,
                    error: format!("worker task failed: {e}"),
                };
                self.event_sink.emit(finished_event(run_id, &outcome)).await;
                outcome
            }
        }
    }
}
