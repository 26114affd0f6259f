//! # Batch outcome.
//!
//! A [`Summary`] is built by the executor after the pool has drained: one
//! [`TaskFailure`] per runner whose body returned an error or panicked.

use std::fmt;

use crate::error::TaskError;

/// One failed task of a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskFailure {
    /// Bound task name, `"{task}#{case id}"`.
    pub task: String,
    /// Stable error label, see [`TaskError::as_label`].
    pub label: &'static str,
    /// Human-readable error message.
    pub reason: String,
}

impl TaskFailure {
    pub(crate) fn new(task: &str, error: &TaskError) -> Self {
        Self {
            task: task.to_owned(),
            label: error.as_label(),
            reason: error.as_message(),
        }
    }
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.task, self.label, self.reason)
    }
}

/// Outcome of one or more executed batches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of tasks that ran.
    pub total: usize,
    /// Tasks that failed, in submission order.
    pub failures: Vec<TaskFailure>,
}

impl Summary {
    /// Number of tasks that completed without error.
    #[inline]
    pub fn succeeded(&self) -> usize {
        self.total.saturating_sub(self.failures.len())
    }

    /// True if no task failed.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Folds `other` into `self`.
    pub fn merge(&mut self, other: Summary) {
        self.total += other.total;
        self.failures.extend(other.failures);
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tasks, {} succeeded, {} failed",
            self.total,
            self.succeeded(),
            self.failures.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_accumulates() {
        let mut a = Summary {
            total: 3,
            failures: vec![TaskFailure::new("gen#1", &TaskError::fail("disk full"))],
        };
        a.merge(Summary {
            total: 2,
            failures: Vec::new(),
        });

        assert_eq!(a.total, 5);
        assert_eq!(a.succeeded(), 4);
        assert!(!a.is_success());
        assert_eq!(a.failures[0].label, "task_failed");
        assert_eq!(a.to_string(), "5 tasks, 4 succeeded, 1 failed");
    }

    #[test]
    fn test_succeeded_saturates_on_inconsistent_counts() {
        let s = Summary {
            total: 1,
            failures: vec![
                TaskFailure::new("a", &TaskError::fail("x")),
                TaskFailure::new("b", &TaskError::fail("y")),
            ],
        };
        assert_eq!(s.succeeded(), 0);
        assert_eq!(s.to_string(), "1 tasks, 0 succeeded, 2 failed");
    }
}
