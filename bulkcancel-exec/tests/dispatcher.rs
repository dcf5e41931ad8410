use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bulkcancel_core::{HttpResponseParts, InputRecord, Outcome, SENTINEL_ID};
use bulkcancel_exec::executor::{
    DispatchError, Dispatcher, DispatcherConfig, Event, EventSink, HttpError, NoOpEventSink,
    RequestExecutor,
};
use uuid::Uuid;

// Answers by id: "ERR*" never completes, "FAIL*" gets a 500, "PANIC" blows up, the rest get 200.
struct ScriptedExecutor {
    delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl ScriptedExecutor {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RequestExecutor for ScriptedExecutor {
    async fn execute(&self, record: &InputRecord) -> Result<HttpResponseParts, HttpError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if record.id == "PANIC" {
            panic!("executor blew up");
        }
        if record.id.starts_with("ERR") {
            return Err(HttpError::Network("connection refused".to_string()));
        }
        if record.id.starts_with("FAIL") {
            return Ok(HttpResponseParts::new(500, b"rejected".to_vec())
                .with_reason("Internal Server Error"));
        }
        Ok(HttpResponseParts::new(200, format!("ok:{}", record.id)).with_reason("OK"))
    }
}

struct RecordingSink {
    events: tokio::sync::Mutex<Vec<Event>>,
}

impl RecordingSink {
    fn new() -> Self {
        Self {
            events: tokio::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn emit(&self, event: Event) {
        self.events.lock().await.push(event);
    }
}

fn records(ids: &[&str]) -> Vec<InputRecord> {
    ids.iter()
        .map(|id| InputRecord::new(*id, "01", "31", "2025"))
        .collect()
}

fn dispatcher(workers: usize, executor: Arc<ScriptedExecutor>) -> Dispatcher {
    Dispatcher::new(DispatcherConfig { workers }, executor, Arc::new(NoOpEventSink)).unwrap()
}

fn by_seq(mut outcomes: Vec<Outcome>) -> Vec<Outcome> {
    outcomes.sort_by_key(Outcome::seq);
    outcomes
}

#[tokio::test]
async fn every_record_yields_exactly_one_outcome() {
    let ids: Vec<String> = (0..50)
        .map(|i| match i % 5 {
            0 => format!("ERR-{i}"),
            1 => format!("FAIL-{i}"),
            _ => format!("P-{i}"),
        })
        .collect();
    let input: Vec<InputRecord> = ids
        .iter()
        .map(|id| InputRecord::new(id.as_str(), "01", "31", "2025"))
        .collect();

    let exec = Arc::new(ScriptedExecutor::new(Duration::from_millis(1)));
    let outcomes = dispatcher(8, exec.clone()).run(Uuid::new_v4(), input).await;

    assert_eq!(outcomes.len(), 50);
    assert_eq!(exec.calls.load(Ordering::SeqCst), 50);
    let seqs: BTreeSet<usize> = outcomes.iter().map(Outcome::seq).collect();
    assert_eq!(seqs, (0..50).collect::<BTreeSet<_>>());
    for o in &outcomes {
        assert_eq!(o.id(), ids[o.seq()]);
    }
}

#[tokio::test]
async fn result_set_partitions_all_records() {
    let exec = Arc::new(ScriptedExecutor::new(Duration::ZERO));
    let set = dispatcher(4, exec)
        .run_batch(Uuid::new_v4(), records(&["A", "FAIL-1", "ERR-1", "B", "FAIL-2"]))
        .await;

    assert_eq!(set.len(), 5);
    assert_eq!(set.succeeded.len(), 2);
    assert_eq!(set.failed.len(), 3);
    assert_eq!(set.transport_errors(), 1);
    assert!(set.succeeded.iter().all(Outcome::is_success));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn never_exceeds_worker_cap() {
    let input: Vec<InputRecord> = (0..100)
        .map(|i| InputRecord::new(format!("P-{i}"), "01", "31", "2025"))
        .collect();
    let exec = Arc::new(ScriptedExecutor::new(Duration::from_millis(10)));

    let outcomes = dispatcher(8, exec.clone()).run(Uuid::new_v4(), input).await;

    assert_eq!(outcomes.len(), 100);
    let peak = exec.peak.load(Ordering::SeqCst);
    assert!(peak <= 8, "observed {peak} concurrent calls with 8 workers");
    assert!(peak > 1, "calls never overlapped");
}

#[tokio::test]
async fn single_worker_runs_sequentially() {
    let exec = Arc::new(ScriptedExecutor::new(Duration::from_millis(2)));
    let outcomes = dispatcher(1, exec.clone())
        .run(Uuid::new_v4(), records(&["A", "B", "C", "D"]))
        .await;

    assert_eq!(exec.peak.load(Ordering::SeqCst), 1);
    let seqs: Vec<usize> = outcomes.iter().map(Outcome::seq).collect();
    assert_eq!(seqs, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn transport_error_does_not_touch_other_records() {
    let clean = records(&["A", "B", "C", "D", "E"]);
    let mut poisoned = clean.clone();
    poisoned[2].id = "ERR-C".to_string();

    let baseline = by_seq(
        dispatcher(3, Arc::new(ScriptedExecutor::new(Duration::from_millis(1))))
            .run(Uuid::new_v4(), clean)
            .await,
    );
    let injected = by_seq(
        dispatcher(3, Arc::new(ScriptedExecutor::new(Duration::from_millis(1))))
            .run(Uuid::new_v4(), poisoned)
            .await,
    );

    assert!(matches!(injected[2], Outcome::TransportError { .. }));
    for j in [0, 1, 3, 4] {
        assert_eq!(baseline[j], injected[j]);
    }
}

#[tokio::test]
async fn panicking_worker_is_still_accounted_for() {
    let sink = Arc::new(RecordingSink::new());
    let exec = Arc::new(ScriptedExecutor::new(Duration::ZERO));
    let d = Dispatcher::new(DispatcherConfig { workers: 2 }, exec, sink.clone()).unwrap();

    let outcomes = by_seq(d.run(Uuid::new_v4(), records(&["A", "PANIC", "B"])).await);

    assert_eq!(outcomes.len(), 3);
    match &outcomes[1] {
        Outcome::TransportError { id, error, .. } => {
            assert_eq!(id, "PANIC");
            assert!(error.starts_with("worker task failed"), "{error}");
        }
        other => panic!("expected transport error, got {other:?}"),
    }
    assert!(outcomes[0].is_success());
    assert!(outcomes[2].is_success());

    let events = sink.events.lock().await;
    let finished = events.iter().filter(|e| e.is_record_finished()).count();
    assert_eq!(finished, 3);
}

#[tokio::test]
async fn blank_id_is_replaced_with_sentinel() {
    let sink = Arc::new(RecordingSink::new());
    let exec = Arc::new(ScriptedExecutor::new(Duration::ZERO));
    let d = Dispatcher::new(DispatcherConfig::default(), exec, sink.clone()).unwrap();

    let set = d
        .run_batch(Uuid::new_v4(), records(&["A", "", "   "]))
        .await;

    assert_eq!(set.len(), 3);
    let sentinel_rows = set
        .rows_succeeded()
        .filter(|r| r.label == SENTINEL_ID)
        .count();
    assert_eq!(sentinel_rows, 2);

    let events = sink.events.lock().await;
    let warnings: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            Event::MissingIdentifier { seq, sentinel, .. } => {
                assert_eq!(sentinel, SENTINEL_ID);
                Some(*seq)
            }
            _ => None,
        })
        .collect();
    assert_eq!(warnings, vec![1, 2]);
}

#[tokio::test]
async fn duplicate_ids_are_processed_independently() {
    let exec = Arc::new(ScriptedExecutor::new(Duration::ZERO));
    let set = dispatcher(8, exec.clone())
        .run_batch(Uuid::new_v4(), records(&["DUP", "DUP", "DUP"]))
        .await;

    assert_eq!(exec.calls.load(Ordering::SeqCst), 3);
    assert_eq!(set.succeeded.len(), 3);
    let seqs: BTreeSet<usize> = set.succeeded.iter().map(Outcome::seq).collect();
    assert_eq!(seqs.len(), 3);
}

#[tokio::test]
async fn empty_batch_finishes_immediately() {
    let sink = Arc::new(RecordingSink::new());
    let exec = Arc::new(ScriptedExecutor::new(Duration::ZERO));
    let d = Dispatcher::new(DispatcherConfig::default(), exec, sink.clone()).unwrap();

    let outcomes = d.run(Uuid::new_v4(), Vec::new()).await;
    assert!(outcomes.is_empty());

    let events = sink.events.lock().await;
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], Event::BatchStarted { total: 0, .. }));
    assert!(matches!(
        events[1],
        Event::BatchFinished {
            succeeded: 0,
            failed: 0,
            ..
        }
    ));
}

#[tokio::test]
async fn emits_batch_and_record_events() {
    let sink = Arc::new(RecordingSink::new());
    let exec = Arc::new(ScriptedExecutor::new(Duration::ZERO));
    let run_id = Uuid::new_v4();
    let d = Dispatcher::new(DispatcherConfig { workers: 2 }, exec, sink.clone()).unwrap();

    d.run(run_id, records(&["A", "FAIL-1", "ERR-1"])).await;

    let events = sink.events.lock().await;
    assert!(events.iter().all(|e| e.run_id() == run_id));
    assert!(matches!(
        events.first(),
        Some(Event::BatchStarted {
            total: 3,
            workers: 2,
            ..
        })
    ));
    assert!(matches!(
        events.last(),
        Some(Event::BatchFinished {
            succeeded: 1,
            failed: 2,
            ..
        })
    ));
    let types: Vec<&str> = events.iter().map(Event::event_type).collect();
    assert_eq!(types.iter().filter(|t| **t == "record.started").count(), 3);
    assert!(types.contains(&"record.succeeded"));
    assert!(types.contains(&"record.failed"));
    assert!(types.contains(&"record.transport_error"));
}

#[test]
fn zero_workers_is_rejected() {
    let exec = Arc::new(ScriptedExecutor::new(Duration::ZERO));
    let err = Dispatcher::new(DispatcherConfig { workers: 0 }, exec, Arc::new(NoOpEventSink))
        .err()
        .unwrap();
    assert!(matches!(err, DispatchError::NoWorkers));
}
