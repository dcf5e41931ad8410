#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("worker pool needs at least one worker")]
    NoWorkers,
}
