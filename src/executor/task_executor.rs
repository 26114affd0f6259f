//! # TaskExecutor: run a batch of task groups to completion.
//!
//! ```text
//! execute(groups, workers):
//!   pool.start(workers)
//!   for group in groups:
//!     while let Some(entry) = group.next():
//!       runner = Runner(BoundTask(entry.build(), group.context))
//!       pool.execute(runner)            (handle kept for the summary)
//!   publish BatchSubmitted{count}
//!   pool.stop()                         (blocks: queue drained, workers joined)
//!   Summary from the handles
//! ```
//!
//! ## Rules
//! - Every produced task runs exactly once; nothing submitted is dropped.
//! - Tasks of any group may run in any order on any worker; at most
//!   `workers` of them at a time.
//! - `execute` returns only after the whole batch has finished.

use std::sync::Arc;

use crate::error::PoolError;
use crate::events::{Event, EventKind};
use crate::pool::ThreadPool;
use crate::subscribers::SubscriberSet;
use crate::tasks::{BoundTask, Runner, TaskGroup};

use super::summary::{Summary, TaskFailure};

/// Fans task groups out over a fresh [`ThreadPool`] and waits for them.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use multigen::{Context, DataConfig, TaskExecutor, TaskFn, TaskGroup};
///
/// let done = Arc::new(AtomicUsize::new(0));
/// let group = TaskGroup::new(Context::normal(1, DataConfig::new()));
/// for _ in 0..10 {
///     let done = Arc::clone(&done);
///     group.add(move || {
///         let done = Arc::clone(&done);
///         TaskFn::boxed("count", move |_: &Context| {
///             done.fetch_add(1, Ordering::Relaxed);
///             Ok(())
///         })
///     });
/// }
///
/// let summary = TaskExecutor::new().execute(&[group], 4).unwrap();
/// assert!(summary.is_success());
/// assert_eq!(done.load(Ordering::Relaxed), 10);
/// ```
#[derive(Default)]
pub struct TaskExecutor {
    subscribers: Option<Arc<SubscriberSet>>,
}

impl TaskExecutor {
    /// Executor publishing no events.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Executor whose pool publishes to `subscribers`.
    #[must_use]
    pub fn with_subscribers(subscribers: Arc<SubscriberSet>) -> Self {
        Self {
            subscribers: Some(subscribers),
        }
    }

    /// Runs every task of every group on `workers` threads and blocks until all are done.
    ///
    /// Task failures do not abort the batch; they are collected in the
    /// returned [`Summary`].
    ///
    /// # Errors
    /// Pool usage errors only, e.g. [`PoolError::InvalidWorkerCount`].
    pub fn execute(&self, groups: &[TaskGroup], workers: usize) -> Result<Summary, PoolError> {
        let pool = match &self.subscribers {
            Some(subs) => ThreadPool::with_subscribers(Arc::clone(subs)),
            None => ThreadPool::new(),
        };
        pool.start(workers)?;

        let mut handles = Vec::new();
        for group in groups {
            while let Some(entry) = group.next() {
                let body = BoundTask::new(entry.build(), Arc::clone(group.context()));
                let runner = Runner::arc(body);
                if let Err(e) = pool.execute(runner.clone()) {
                    let _ = pool.stop();
                    return Err(e);
                }
                handles.push(runner);
            }
        }

        if let Some(subs) = &self.subscribers {
            subs.emit(&Event::new(EventKind::BatchSubmitted).with_count(handles.len()));
        }
        pool.stop()?;

        let failures = handles
            .iter()
            .filter_map(|h| h.error().map(|e| TaskFailure::new(h.name(), e)))
            .collect();
        Ok(Summary {
            total: handles.len(),
            failures,
        })
    }
}

impl std::fmt::Debug for TaskExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskExecutor")
            .field("subscribers", &self.subscribers.as_ref().map(|s| s.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel;
    use crate::context::{Context, DataConfig, entry};
    use crate::error::TaskError;
    use crate::tasks::TaskFn;

    #[test]
    fn test_sum_through_result_channel() {
        let (tx, rx) = channel::create::<i64>();
        drop(tx);

        let ctx = Context::normal(1, DataConfig::from_iter([entry("a", 1), entry("b", 2)]));
        let group = TaskGroup::new(ctx);

        let results = rx.share();
        group.add(move || {
            let out = channel::open(&results);
            TaskFn::boxed("sum", move |ctx: &Context| {
                let sum = ctx.config().parse::<i64>("a")? + ctx.config().parse::<i64>("b")?;
                out.send(sum).map_err(|_| TaskError::fail("result receiver gone"))?;
                Ok(())
            })
        });
        group.add(|| TaskFn::boxed("noop", |_: &Context| Ok(())));

        let summary = TaskExecutor::new().execute(&[group], 8).unwrap();
        assert_eq!(summary.total, 2);
        assert!(summary.is_success());

        assert_eq!(rx.receive(), Some(3));
        assert_eq!(rx.receive(), None);
        assert!(!rx.is_open());
    }

    #[test]
    fn test_failures_are_reported_not_fatal() {
        let groups: Vec<TaskGroup> = (1..=3)
            .map(|i| {
                let group = TaskGroup::new(Context::normal(i, DataConfig::new()));
                group.add(|| TaskFn::boxed("ok", |_: &Context| Ok(())));
                group.add(|| {
                    TaskFn::boxed("needs-n", |ctx: &Context| {
                        ctx.config().parse::<u32>("n")?;
                        Ok(())
                    })
                });
                group
            })
            .collect();

        let summary = TaskExecutor::new().execute(&groups, 2).unwrap();
        assert_eq!(summary.total, 6);
        assert_eq!(summary.succeeded(), 3);

        let mut names: Vec<&str> = summary.failures.iter().map(|f| f.task.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, ["needs-n#1", "needs-n#2", "needs-n#3"]);
        assert!(summary.failures.iter().all(|f| f.label == "task_config"));
    }

    #[test]
    fn test_invalid_worker_count_is_rejected() {
        let group = TaskGroup::new(Context::normal(1, DataConfig::new()));
        group.add(|| TaskFn::boxed("noop", |_: &Context| Ok(())));

        let err = TaskExecutor::new().execute(&[group], 0).unwrap_err();
        assert!(matches!(err, PoolError::InvalidWorkerCount { count: 0 }));
    }
}
