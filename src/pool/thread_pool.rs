//! # ThreadPool: fixed-size workers draining a shared runner queue.
//!
//! ```text
//!            execute(runner)                ┌──────────► Worker 0 ──► runner.call()
//! caller ───────────────────► [Channel] ────┼──────────► Worker 1 ──► runner.call()
//!         (pool holds the only Sender)      └──────────► Worker N ──► runner.call()
//! ```
//!
//! ## Rules
//! - Constructed stopped. `start(n)` spawns exactly `n` workers and returns
//!   only once all of them are ready.
//! - `stop()` drops the pool's sender. Workers keep receiving until the queue
//!   is empty, then observe closure and exit; `stop()` joins them all.
//! - Each `start` builds a fresh channel, so a stopped pool may be restarted.
//!   A `start` racing an in-progress `stop` waits for the old workers to be
//!   joined first.
//! - Dropping a running pool stops it.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_utils::sync::WaitGroup;
use parking_lot::Mutex;

use crate::channel::{self, Sender};
use crate::error::PoolError;
use crate::events::{Event, EventKind};
use crate::subscribers::SubscriberSet;
use crate::tasks::{Runnable, Runner, RunnerRef, Status};

use super::worker::{Worker, WorkerParams};

/// Resources that exist only while the pool is running.
struct Active {
    sender: Sender<RunnerRef>,
    workers: Vec<Worker>,
}

/// Fixed-size pool of worker threads.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use multigen::{RunFn, TaskError, ThreadPool};
///
/// let hits = Arc::new(AtomicUsize::new(0));
/// let pool = ThreadPool::new();
/// pool.start(4).unwrap();
///
/// for _ in 0..100 {
///     let hits = Arc::clone(&hits);
///     pool.submit(RunFn::new("hit", move || {
///         hits.fetch_add(1, Ordering::Relaxed);
///         Ok::<_, TaskError>(())
///     }))
///     .unwrap();
/// }
///
/// pool.stop().unwrap();
/// assert_eq!(hits.load(Ordering::Relaxed), 100);
/// ```
pub struct ThreadPool {
    /// Serializes `start` and `stop`, held until workers are spawned or joined.
    lifecycle: Mutex<()>,
    active: Mutex<Option<Active>>,
    running: Arc<AtomicUsize>,
    subscribers: Option<Arc<SubscriberSet>>,
}

impl ThreadPool {
    /// Creates a stopped pool that publishes no events.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lifecycle: Mutex::new(()),
            active: Mutex::new(None),
            running: Arc::new(AtomicUsize::new(0)),
            subscribers: None,
        }
    }

    /// Creates a stopped pool publishing pool and task events to `subscribers`.
    #[must_use]
    pub fn with_subscribers(subscribers: Arc<SubscriberSet>) -> Self {
        Self {
            lifecycle: Mutex::new(()),
            active: Mutex::new(None),
            running: Arc::new(AtomicUsize::new(0)),
            subscribers: Some(subscribers),
        }
    }

    /// Spawns `workers` threads and blocks until every one of them is ready.
    ///
    /// # Errors
    /// - [`PoolError::InvalidWorkerCount`] if `workers == 0`;
    /// - [`PoolError::AlreadyStarted`] if the pool is running;
    /// - [`PoolError::Spawn`] if a thread could not be created (already
    ///   spawned workers are shut down and the pool stays stopped).
    pub fn start(&self, workers: usize) -> Result<(), PoolError> {
        if workers == 0 {
            return Err(PoolError::InvalidWorkerCount { count: workers });
        }
        let _lifecycle = self.lifecycle.lock();
        let mut active = self.active.lock();
        if active.is_some() {
            return Err(PoolError::AlreadyStarted);
        }

        let (sender, receiver) = channel::create::<RunnerRef>();
        let ready = WaitGroup::new();
        let mut spawned = Vec::with_capacity(workers);

        for index in 0..workers {
            let params = WorkerParams {
                index,
                receiver: receiver.share(),
                running: Arc::clone(&self.running),
                ready: ready.clone(),
                subscribers: self.subscribers.clone(),
            };
            match Worker::start(params) {
                Ok(worker) => spawned.push(worker),
                Err(source) => {
                    drop(sender);
                    for mut worker in spawned {
                        worker.join();
                    }
                    return Err(PoolError::Spawn { source });
                }
            }
        }
        drop(receiver);
        ready.wait();

        *active = Some(Active {
            sender,
            workers: spawned,
        });
        drop(active);

        self.publish(|| Event::new(EventKind::PoolStarted).with_count(workers));
        Ok(())
    }

    /// Closes the queue and blocks until every queued runner has executed and
    /// every worker has exited.
    ///
    /// # Errors
    /// [`PoolError::AlreadyStopped`] if the pool is not running.
    pub fn stop(&self) -> Result<(), PoolError> {
        let _lifecycle = self.lifecycle.lock();
        let Active { sender, workers } = self
            .active
            .lock()
            .take()
            .ok_or(PoolError::AlreadyStopped)?;

        drop(sender);
        let joined = workers.len();
        for mut worker in workers {
            worker.join();
        }

        self.publish(|| Event::new(EventKind::PoolStopped).with_count(joined));
        Ok(())
    }

    /// Enqueues a runner. Never blocks.
    ///
    /// # Errors
    /// - [`PoolError::RunnerConsumed`] if the runner was already called;
    /// - [`PoolError::NotRunning`] if the pool is stopped.
    pub fn execute(&self, runner: RunnerRef) -> Result<(), PoolError> {
        if runner.status() != Status::Pending {
            return Err(PoolError::RunnerConsumed);
        }
        let active = self.active.lock();
        let active = active.as_ref().ok_or(PoolError::NotRunning)?;
        active
            .sender
            .send(runner)
            .map_err(|_| PoolError::NotRunning)
    }

    /// Wraps `body` in a [`Runner`], enqueues it and returns the typed handle,
    /// so the caller can still inspect its status and its body.
    ///
    /// # Errors
    /// Same as [`execute`](Self::execute).
    pub fn submit<R: Runnable>(&self, body: R) -> Result<Arc<Runner<R>>, PoolError> {
        let runner = Runner::arc(body);
        self.execute(runner.clone())?;
        Ok(runner)
    }

    /// Number of worker threads currently alive.
    #[inline]
    pub fn running_workers(&self) -> usize {
        self.running.load(Ordering::Acquire)
    }

    /// True between a successful `start` and the next `stop`.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.active.lock().is_some()
    }

    fn publish(&self, event: impl FnOnce() -> Event) {
        if let Some(subs) = &self.subscribers {
            subs.emit(&event());
        }
    }
}

impl Default for ThreadPool {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        if self.is_running() {
            let _ = self.stop();
        }
    }
}

impl std::fmt::Debug for ThreadPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadPool")
            .field("running", &self.is_running())
            .field("running_workers", &self.running_workers())
            .finish()
    }
}
