use std::time::Duration;

use bulkcancel_exec::executor::concurrency::WorkerPool;

#[tokio::test]
async fn worker_pool_blocks_when_full() {
    let pool = WorkerPool::new(2);

    let permit1 = pool.acquire().await;
    let permit2 = pool.acquire().await;
    assert_eq!(pool.available(), 0);

    let start = std::time::Instant::now();
    let permit3_fut = pool.acquire();
    tokio::time::sleep(Duration::from_millis(50)).await;
    drop(permit1);
    let permit3 = permit3_fut.await;
    let elapsed = start.elapsed();

    assert!(elapsed >= Duration::from_millis(50));
    drop(permit2);
    drop(permit3);
    assert_eq!(pool.available(), 2);
}

#[tokio::test]
async fn worker_pool_reports_size() {
    let pool = WorkerPool::new(8);
    assert_eq!(pool.size(), 8);
    assert_eq!(pool.available(), 8);

    let permit = pool.acquire().await;
    assert_eq!(pool.available(), 7);
    drop(permit);
    assert_eq!(pool.available(), 8);
}
