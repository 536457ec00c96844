//! The shared batch queue between the producer and the worker pool.
//!
//! [`TaskQueue`] is an unbounded FIFO: the producer never waits for space, and
//! workers block on a condition variable until a batch arrives or the pool's
//! [`StopSignal`](crate::core::StopSignal) is raised and the queue has drained.
//!
//! There is no backpressure. A producer that outpaces the workers grows the
//! queue until the input ends.

mod task_queue;

pub use task_queue::TaskQueue;
