use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Fixed number of execution slots shared by one batch.
pub struct WorkerPool {
    slots: Arc<Semaphore>,
    size: usize,
}

impl WorkerPool {
    pub fn new(size: usize) -> Self {
        Self {
            slots: Arc::new(Semaphore::new(size)),
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn available(&self) -> usize {
        self.slots.available_permits()
    }

    /// Waits for a free slot. The slot is released when the permit is dropped.
    pub async fn acquire(&self) -> WorkerPermit {
        // The pool never closes its semaphore; a closed one means a bug.
        let permit = self.slots.clone().acquire_owned().await.unwrap_or_else(|_| {
            panic!("worker pool semaphore closed unexpectedly. This is a bug - please report it.");
        });
        WorkerPermit { _slot: permit }
    }
}

pub struct WorkerPermit {
    _slot: OwnedSemaphorePermit,
}
