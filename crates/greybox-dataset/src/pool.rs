//! Bounded worker pool for batch jobs
//!
//! Batch runs (PNG conversion, sheet slicing) fan out over a fixed number
//! of worker threads. The job channel is bounded to the worker count, so
//! feeding backpressures instead of buffering an entire dataset in
//! memory; each worker pulls its next unit of work as soon as it finishes
//! the previous one.

use crossbeam_channel::bounded;

/// Run `f` over `items` on `workers` threads and collect the results.
///
/// Results arrive in completion order, not submission order. A worker
/// count of 0 is treated as 1. The calling thread blocks until every
/// item has been processed.
pub fn run_parallel<T, R, F>(items: Vec<T>, workers: usize, f: F) -> Vec<R>
where
    T: Send,
    R: Send,
    F: Fn(T) -> R + Sync,
{
    let workers = workers.max(1);
    let (job_tx, job_rx) = bounded::<T>(workers);
    let (result_tx, result_rx) = bounded::<R>(workers);

    std::thread::scope(|scope| {
        scope.spawn(move || {
            for item in items {
                // Workers only disconnect by panicking; stop feeding then
                if job_tx.send(item).is_err() {
                    break;
                }
            }
        });

        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let f = &f;
            scope.spawn(move || {
                for item in job_rx.iter() {
                    if result_tx.send(f(item)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(job_rx);
        drop(result_tx);

        result_rx.iter().collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_processes_every_item() {
        let items: Vec<u32> = (0..100).collect();
        let mut results = run_parallel(items, 4, |n| n * n);
        results.sort();
        let expected: Vec<u32> = (0..100).map(|n| n * n).collect();
        assert_eq!(results, expected);
    }

    #[test]
    fn test_empty_input() {
        let results = run_parallel(Vec::<u32>::new(), 4, |n| n);
        assert!(results.is_empty());
    }

    #[test]
    fn test_zero_workers_still_runs() {
        let results = run_parallel(vec![1, 2, 3], 0, |n| n + 1);
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_worker_count_bounds_concurrency() {
        let live = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);
        let items: Vec<u32> = (0..32).collect();

        run_parallel(items, 2, |_| {
            let now = live.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(2));
            live.fetch_sub(1, Ordering::SeqCst);
        });

        assert!(peak.load(Ordering::SeqCst) <= 2);
    }
}
