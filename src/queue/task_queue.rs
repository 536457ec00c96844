//! Unbounded FIFO of batches guarded by a mutex and a condition variable.

use crate::core::{Batch, StopSignal};
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

/// A thread-safe, unbounded FIFO of [`Batch`]es.
///
/// Producers never block: the queue grows without limit. Consumers block in
/// [`dequeue_blocking`](Self::dequeue_blocking) until a batch arrives or the
/// [`StopSignal`] is raised and the queue has drained.
///
/// # Example
///
/// ```rust
/// use prime_counter::core::{Batch, StopSignal};
/// use prime_counter::queue::TaskQueue;
///
/// let queue = TaskQueue::new();
/// let stop = StopSignal::new();
///
/// queue.enqueue(Batch::from(vec![2, 3, 4]));
/// stop.raise();
/// queue.wake_all();
///
/// // Queued work is still handed out after the stop signal...
/// assert_eq!(queue.dequeue_blocking(&stop).map(|b| b.len()), Some(3));
/// // ...and only an empty queue ends the work.
/// assert!(queue.dequeue_blocking(&stop).is_none());
/// ```
#[derive(Debug, Default)]
pub struct TaskQueue {
    tasks: Mutex<VecDeque<Batch>>,
    available: Condvar,
}

impl TaskQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a batch to the tail and wakes one blocked consumer.
    pub fn enqueue(&self, batch: Batch) {
        let mut tasks = self.tasks.lock();
        tasks.push_back(batch);
        self.available.notify_one();
    }

    /// Removes the batch at the head, blocking while the queue is empty and
    /// `stop` has not been raised.
    ///
    /// Returns `None` only when `stop` is raised and the queue is empty, both
    /// observed under the same lock acquisition. Batches queued before the
    /// stop are always handed out first.
    pub fn dequeue_blocking(&self, stop: &StopSignal) -> Option<Batch> {
        let mut tasks = self.tasks.lock();
        loop {
            if let Some(batch) = tasks.pop_front() {
                return Some(batch);
            }
            if stop.is_raised() {
                return None;
            }
            // Wait releases the lock and re-acquires it before returning.
            self.available.wait(&mut tasks);
        }
    }

    /// Removes the batch at the head without blocking.
    ///
    /// Workers never use this; it lets a pool discard queued batches on abort.
    pub fn try_dequeue(&self) -> Option<Batch> {
        self.tasks.lock().pop_front()
    }

    /// Wakes every blocked consumer so each one re-checks the stop signal.
    ///
    /// Call after raising the [`StopSignal`]. The lock is taken first so a
    /// consumer between its stop check and its wait cannot miss the wakeup.
    pub fn wake_all(&self) {
        let _tasks = self.tasks.lock();
        self.available.notify_all();
    }

    /// Current number of queued batches
    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Whether no batches are queued
    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::mpsc;
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_fifo_order() {
        let queue = TaskQueue::new();
        let stop = StopSignal::new();
        for i in 0..5 {
            queue.enqueue(Batch::from(vec![i]));
        }
        assert_eq!(queue.len(), 5);

        for i in 0..5 {
            let batch = queue.dequeue_blocking(&stop).expect("queue should not end");
            assert_eq!(batch.numbers(), &[i]);
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_try_dequeue_empty() {
        let queue = TaskQueue::new();
        assert!(queue.try_dequeue().is_none());

        queue.enqueue(Batch::from(vec![1, 2]));
        assert_eq!(queue.try_dequeue(), Some(Batch::from(vec![1, 2])));
        assert!(queue.try_dequeue().is_none());
    }

    #[test]
    fn test_stop_on_empty_queue_ends_work() {
        let queue = TaskQueue::new();
        let stop = StopSignal::new();
        stop.raise();
        assert!(queue.dequeue_blocking(&stop).is_none());
    }

    #[test]
    fn test_blocked_consumer_wakes_on_enqueue() {
        let queue = Arc::new(TaskQueue::new());
        let stop = Arc::new(StopSignal::new());
        let (tx, rx) = mpsc::channel();

        let handle = {
            let queue = Arc::clone(&queue);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let batch = queue.dequeue_blocking(&stop);
                tx.send(batch).expect("send batch");
            })
        };

        // Consumer should be blocked on an empty queue.
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());

        queue.enqueue(Batch::from(vec![11]));
        let received = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("consumer did not wake");
        assert_eq!(received, Some(Batch::from(vec![11])));

        handle.join().expect("Consumer panicked");
    }

    #[test]
    fn test_wake_all_releases_every_waiter() {
        let queue = Arc::new(TaskQueue::new());
        let stop = Arc::new(StopSignal::new());
        let consumers = 6;
        let (tx, rx) = mpsc::channel();

        let handles: Vec<_> = (0..consumers)
            .map(|_| {
                let queue = Arc::clone(&queue);
                let stop = Arc::clone(&stop);
                let tx = tx.clone();
                thread::spawn(move || {
                    let batch = queue.dequeue_blocking(&stop);
                    tx.send(batch.is_none()).expect("send result");
                })
            })
            .collect();

        thread::sleep(Duration::from_millis(50));
        stop.raise();
        queue.wake_all();

        for _ in 0..consumers {
            let ended = rx
                .recv_timeout(Duration::from_secs(5))
                .expect("a consumer stayed blocked");
            assert!(ended);
        }
        for handle in handles {
            handle.join().expect("Consumer panicked");
        }
    }

    #[test]
    fn test_batches_consumed_exactly_once() {
        let queue = Arc::new(TaskQueue::new());
        let stop = Arc::new(StopSignal::new());
        let consumers = 4;
        let barrier = Arc::new(Barrier::new(consumers + 1));

        let handles: Vec<_> = (0..consumers)
            .map(|_| {
                let queue = Arc::clone(&queue);
                let stop = Arc::clone(&stop);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let mut seen = Vec::new();
                    while let Some(batch) = queue.dequeue_blocking(&stop) {
                        seen.extend(batch.into_numbers());
                    }
                    seen
                })
            })
            .collect();

        barrier.wait();
        for i in 0..1_000 {
            queue.enqueue(Batch::from(vec![i]));
        }
        stop.raise();
        queue.wake_all();

        let mut seen = HashSet::new();
        for handle in handles {
            for n in handle.join().expect("Consumer panicked") {
                // Each batch should be observed exactly once.
                assert!(seen.insert(n), "batch {} delivered twice", n);
            }
        }
        assert_eq!(seen.len(), 1_000);
        assert!(queue.is_empty());
    }
}
