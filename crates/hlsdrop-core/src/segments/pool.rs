//! Bounded worker pool over a shared work queue.

use std::collections::VecDeque;
use std::sync::mpsc;
use std::sync::Mutex;

/// Runs `work` over `items` on at most `max_workers` scoped threads.
///
/// Results come back in input order. Each item's outcome is independent:
/// a failing item never stops the others.
pub(super) fn run_bounded<T, R, F>(items: Vec<T>, max_workers: usize, work: F) -> Vec<R>
where
    T: Send,
    R: Send,
    F: Fn(T) -> R + Sync,
{
    let count = items.len();
    if count == 0 {
        return Vec::new();
    }
    let num_workers = max_workers.max(1).min(count);
    if num_workers == 1 {
        return items.into_iter().map(&work).collect();
    }

    let queue: Mutex<VecDeque<(usize, T)>> = Mutex::new(items.into_iter().enumerate().collect());
    let (tx, rx) = mpsc::channel::<(usize, R)>();

    std::thread::scope(|scope| {
        for _ in 0..num_workers {
            let tx = tx.clone();
            let queue = &queue;
            let work = &work;
            scope.spawn(move || loop {
                let next = match queue.lock() {
                    Ok(mut q) => q.pop_front(),
                    Err(_) => None,
                };
                let Some((index, item)) = next else { break };
                if tx.send((index, work(item))).is_err() {
                    break;
                }
            });
        }
    });
    drop(tx);

    let mut indexed: Vec<(usize, R)> = rx.into_iter().collect();
    indexed.sort_by_key(|(i, _)| *i);
    indexed.into_iter().map(|(_, r)| r).collect()
}
