//! Integration tests for the thread pool's external contract.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use taskpool::prelude::*;

#[test]
fn all_submitted_tasks_yield_their_own_result() {
    for workers in [1, 2, 4, 8] {
        let pool = ThreadPool::with_threads(workers).unwrap();

        let handles: Vec<_> = (0..50)
            .map(|i| pool.submit(move || format!("task-{}", i)).unwrap())
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), format!("task-{}", i));
        }

        pool.shutdown().unwrap();
    }
}

#[test]
fn single_worker_completes_in_submission_order() {
    let pool = ThreadPool::with_threads(1).unwrap();
    let completed = Arc::new(Mutex::new(Vec::new()));

    // Submit faster than one worker can drain
    let handles: Vec<_> = (0..30)
        .map(|i| {
            let completed = Arc::clone(&completed);
            pool.submit(move || {
                thread::sleep(Duration::from_millis(1));
                completed.lock().unwrap().push(i);
            })
            .unwrap()
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(*completed.lock().unwrap(), (0..30).collect::<Vec<_>>());
    pool.shutdown().unwrap();
}

#[test]
fn shutdown_drains_the_backlog() {
    let pool = ThreadPool::with_threads(2).unwrap();
    let executed = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..40)
        .map(|i| {
            let executed = Arc::clone(&executed);
            pool.submit(move || {
                thread::sleep(Duration::from_millis(2));
                executed.fetch_add(1, Ordering::Relaxed);
                i
            })
            .unwrap()
        })
        .collect();

    // Begin teardown immediately; it must not return until the backlog ran
    pool.shutdown().unwrap();

    assert_eq!(executed.load(Ordering::Relaxed), 40);
    assert!(pool.queue_is_empty());

    // None of the results were silently dropped
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), i);
    }
}

#[test]
fn submission_after_shutdown_is_rejected_not_hung() {
    let pool = ThreadPool::with_threads(2).unwrap();
    pool.shutdown().unwrap();

    let started = Instant::now();
    let result = pool.submit(|| 0);
    assert!(matches!(result, Err(PoolError::ShuttingDown { .. })));
    // The rejection is synchronous at the call site
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn failing_task_does_not_crash_its_worker() {
    let pool = ThreadPool::with_threads(1).unwrap();

    let failing = pool
        .submit(|| -> i32 { panic!("deliberate failure") })
        .unwrap();
    let succeeding = pool.submit(|| 123).unwrap();

    assert!(matches!(
        failing.join(),
        Err(PoolError::TaskPanicked { .. })
    ));
    assert_eq!(succeeding.join().unwrap(), 123);

    pool.shutdown().unwrap();
}

#[test]
fn error_results_pass_through_the_handle() {
    let pool = ThreadPool::with_threads(2).unwrap();

    let handle = pool
        .submit(|| -> Result<u32> { Err(PoolError::other("domain failure")) })
        .unwrap();

    // The task itself returned an error value; the handle delivers it intact
    match handle.join().unwrap() {
        Err(PoolError::Other(msg)) => assert_eq!(msg, "domain failure"),
        other => panic!("expected Other error, got {:?}", other),
    }

    pool.shutdown().unwrap();
}

#[test]
fn sleeping_tasks_resolve_to_their_own_index() {
    // The reference scenario: 4 workers, 4 sleepers returning their index,
    // scaled from seconds to milliseconds
    let pool = ThreadPool::with_threads(4).unwrap();

    let handles: Vec<_> = (0..4u64)
        .map(|i| {
            pool.submit(move || {
                thread::sleep(Duration::from_millis(i * 50));
                i
            })
            .unwrap()
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), i as u64);
    }

    pool.shutdown().unwrap();
}

#[test]
fn introspection_is_stable_between_submissions() {
    let pool = ThreadPool::with_threads(2).unwrap();

    for _ in 0..20 {
        assert!(!pool.is_stopping());
        assert!(pool.queue_is_empty());
    }

    pool.shutdown().unwrap();

    for _ in 0..20 {
        assert!(pool.is_stopping());
        assert!(pool.queue_is_empty());
    }
}

#[test]
fn handles_may_be_dropped_without_reading() {
    let pool = ThreadPool::with_threads(2).unwrap();
    let executed = Arc::new(AtomicUsize::new(0));

    for _ in 0..10 {
        let executed = Arc::clone(&executed);
        let handle = pool
            .submit(move || {
                executed.fetch_add(1, Ordering::Relaxed);
            })
            .unwrap();
        drop(handle);
    }

    pool.shutdown().unwrap();
    // Discarding the handle discards the result, not the task
    assert_eq!(executed.load(Ordering::Relaxed), 10);
}

#[test]
fn heterogeneous_result_types_coexist() {
    let pool = ThreadPool::with_threads(2).unwrap();

    let as_string = pool.submit(|| "text".to_string()).unwrap();
    let as_number = pool.submit(|| 3.5f64).unwrap();
    let as_vec = pool.submit(|| vec![1u8, 2, 3]).unwrap();

    assert_eq!(as_string.join().unwrap(), "text");
    assert_eq!(as_number.join().unwrap(), 3.5);
    assert_eq!(as_vec.join().unwrap(), vec![1, 2, 3]);

    pool.shutdown().unwrap();
}
