//! # Pool, batch and task events.
//!
//! Workers and the executor describe what they do as [`Event`]s; an
//! [`EventKind`] says which step happened and the optional fields carry the
//! details for that step (task name, worker index, counts, failure reason).
//!
//! Events are stamped with `seq`, a process-wide counter. Workers publish
//! concurrently, so a subscriber that needs the true order sorts by `seq`.
//!
//! ```rust
//! use multigen::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::TaskFailed)
//!     .with_task("AddGenerator#1-1")
//!     .with_worker(3)
//!     .with_reason("boom");
//!
//! assert!(ev.is_task_event());
//! assert_eq!(ev.task.as_deref(), Some("AddGenerator#1-1"));
//! assert_eq!(ev.worker, Some(3));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

/// Next `seq` to hand out.
static NEXT_SEQ: AtomicU64 = AtomicU64::new(0);

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    // pool
    /// All workers are up and the pool accepts runners.
    ///
    /// Sets:
    /// - `count`: number of workers
    PoolStarted,

    /// Every queued runner has executed and all workers have exited.
    ///
    /// Sets:
    /// - `count`: number of workers joined
    PoolStopped,

    // executor
    /// The executor drained every group and submitted every task.
    ///
    /// Sets:
    /// - `count`: number of tasks submitted
    BatchSubmitted,

    // workers
    /// A worker won a runner and is about to execute its body.
    ///
    /// Sets:
    /// - `task`: runner name
    /// - `worker`: worker index
    TaskStarting,

    /// The body returned successfully.
    ///
    /// Sets:
    /// - `task`: runner name
    /// - `worker`: worker index
    TaskStopped,

    /// The body returned an error or panicked.
    ///
    /// Sets:
    /// - `task`: runner name
    /// - `worker`: worker index
    /// - `reason`: [`TaskError::as_message`](crate::TaskError::as_message)
    TaskFailed,

    // subscribers
    /// A subscriber panicked while handling an event.
    ///
    /// Sets:
    /// - `task`: name of the panicking subscriber
    /// - `reason`: panic message
    SubscriberPanicked,
}

/// One observed step of a pool, a batch or a task.
///
/// Which optional fields are set depends on [`kind`](Event::kind); see the
/// variants of [`EventKind`].
#[derive(Debug, Clone)]
pub struct Event {
    /// Process-wide publication order.
    pub seq: u64,
    /// When the event was built.
    pub at: SystemTime,
    pub kind: EventKind,
    /// Name of the task (or subscriber), if applicable.
    pub task: Option<Arc<str>>,
    /// Index of the worker that produced the event.
    pub worker: Option<usize>,
    /// Workers or tasks involved, depending on the kind.
    pub count: Option<usize>,
    /// Human-readable reason (errors, panic info).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Stamps a new event of `kind`.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: NEXT_SEQ.fetch_add(1, Ordering::Relaxed),
            at: SystemTime::now(),
            kind,
            task: None,
            worker: None,
            count: None,
            reason: None,
        }
    }

    /// Sets the task (or subscriber) name.
    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Attaches the worker index.
    #[inline]
    pub fn with_worker(mut self, worker: usize) -> Self {
        self.worker = Some(worker);
        self
    }

    /// Attaches a worker or task count.
    #[inline]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Sets the failure reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// A subscriber named `subscriber` panicked with `info`.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Self::new(EventKind::SubscriberPanicked)
            .with_task(subscriber)
            .with_reason(info)
    }

    #[inline]
    pub fn is_task_event(&self) -> bool {
        matches!(
            self.kind,
            EventKind::TaskStarting | EventKind::TaskStopped | EventKind::TaskFailed
        )
    }
}
