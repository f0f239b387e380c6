//! Integration tests for core-async on the Tokio runtime.
//!
//! These tests verify the facade behaves like the runtime primitives the
//! playback ticker relies on: spawned tasks, abortable handles, delayed
//! intervals and cancellation tokens.

use core_async::{sync, task, time};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn test_task_spawn() {
    let handle = task::spawn(async { 42 });
    let result = handle.await.unwrap();
    assert_eq!(result, 42);
}

#[tokio::test]
async fn test_task_abort_reports_cancelled() {
    let handle = task::spawn(std::future::pending::<()>());
    handle.abort();

    let err = handle.await.unwrap_err();
    assert!(err.is_cancelled());
}

#[tokio::test]
async fn test_has_runtime_inside_tokio() {
    assert!(task::has_runtime());
}

#[test]
fn test_has_runtime_outside_tokio() {
    assert!(!task::has_runtime());
}

#[test]
fn test_block_on() {
    let value = core_async::runtime::block_on(async { 7 * 6 }).unwrap();
    assert_eq!(value, 42);
}

#[tokio::test(start_paused = true)]
async fn test_delayed_interval_skips_immediate_tick() {
    let start = time::Instant::now();
    let mut ticks = time::delayed_interval(time::Duration::from_millis(100));

    ticks.tick().await;
    let first = start.elapsed();
    assert!(first >= time::Duration::from_millis(100));
    assert!(first < time::Duration::from_millis(150));

    ticks.tick().await;
    let second = start.elapsed();
    assert!(second >= time::Duration::from_millis(200));
    assert!(second < time::Duration::from_millis(250));
}

#[tokio::test(start_paused = true)]
async fn test_delayed_interval_counts_ticks() {
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = Arc::clone(&counter);

    let handle = task::spawn(async move {
        let mut ticks = time::delayed_interval(time::Duration::from_millis(50));
        loop {
            ticks.tick().await;
            counter_clone.fetch_add(1, Ordering::SeqCst);
        }
    });

    // Land between tick boundaries so wake-up order cannot matter.
    time::sleep(time::Duration::from_millis(175)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 3);

    handle.abort();
}

#[tokio::test]
async fn test_cancellation_token_stops_worker() {
    let token = sync::CancellationToken::new();
    let child = token.clone();

    let worker = task::spawn(async move {
        core_async::select! {
            _ = child.cancelled() => "cancelled",
            _ = time::sleep(time::Duration::from_secs(60)) => "timed out",
        }
    });

    token.cancel();
    assert_eq!(worker.await.unwrap(), "cancelled");
    assert!(token.is_cancelled());
}

#[tokio::test]
async fn test_drop_guard_cancels_on_drop() {
    let token = sync::CancellationToken::new();
    let guard = token.clone().drop_guard();

    assert!(!token.is_cancelled());
    drop(guard);
    assert!(token.is_cancelled());
}

#[tokio::test]
async fn test_broadcast_channel() {
    let (tx, mut rx1) = sync::broadcast::channel(10);
    let mut rx2 = tx.subscribe();

    task::spawn(async move {
        for i in 0..5 {
            tx.send(i).unwrap();
        }
    });

    let mut values1 = vec![];
    let mut values2 = vec![];

    for _ in 0..5 {
        values1.push(rx1.recv().await.unwrap());
        values2.push(rx2.recv().await.unwrap());
    }

    assert_eq!(values1, vec![0, 1, 2, 3, 4]);
    assert_eq!(values2, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_now_millis() {
    assert!(time::now_millis() > 0);
}
