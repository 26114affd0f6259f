//! Error types used by the pool, the tasks, and their collaborators.
//!
//! This module defines four error enums:
//!
//! - [`PoolError`]: usage errors raised by [`ThreadPool`](crate::ThreadPool) and
//!   [`TaskExecutor`](crate::TaskExecutor).
//! - [`TaskError`]: failures of an individual task body.
//! - [`ConfigError`]: missing or malformed [`DataConfig`](crate::DataConfig) values.
//! - [`StreamError`]: stream resources that could not be acquired or released.
//!
//! All of them provide `as_label` (stable snake_case, for logs) and `as_message`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// # Usage errors of the worker pool.
///
/// These are programmer errors: they are reported synchronously at the call
/// that violates the precondition and are never retried.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum PoolError {
    /// `start` was given a worker count that is not positive.
    #[error("worker count must be positive, got {count}")]
    InvalidWorkerCount {
        /// The rejected count.
        count: usize,
    },

    /// `start` was called on a running pool.
    #[error("the pool has already started")]
    AlreadyStarted,

    /// `stop` was called on a stopped pool.
    #[error("the pool has already stopped")]
    AlreadyStopped,

    /// A runner was submitted while the pool is stopped.
    #[error("the pool can't accept a runner when stopped")]
    NotRunning,

    /// A runner that is no longer pending was submitted; it could never do work.
    #[error("the runner has already been called")]
    RunnerConsumed,

    /// The OS refused to spawn a worker thread.
    #[error("failed to spawn worker thread: {source}")]
    Spawn {
        /// Underlying spawn failure.
        #[source]
        source: io::Error,
    },
}

impl PoolError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use multigen::PoolError;
    ///
    /// assert_eq!(PoolError::NotRunning.as_label(), "pool_not_running");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            PoolError::InvalidWorkerCount { .. } => "pool_invalid_worker_count",
            PoolError::AlreadyStarted => "pool_already_started",
            PoolError::AlreadyStopped => "pool_already_stopped",
            PoolError::NotRunning => "pool_not_running",
            PoolError::RunnerConsumed => "pool_runner_consumed",
            PoolError::Spawn { .. } => "pool_spawn_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        self.to_string()
    }
}

/// # Errors produced by a task body.
///
/// A failing task never takes its worker down: the failure is stored on the
/// task's runner and reported in the batch [`Summary`](crate::Summary).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TaskError {
    /// The task reported a failure of its own.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// The task body panicked; the panic was caught by its runner.
    #[error("task panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },

    /// The task's configuration was missing a key or held a malformed value.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A stream resource could not be acquired or released.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// Reading or writing task data failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl TaskError {
    /// Convenience constructor for [`TaskError::Fail`].
    pub fn fail(error: impl Into<String>) -> Self {
        TaskError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use multigen::TaskError;
    ///
    /// assert_eq!(TaskError::fail("boom").as_label(), "task_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Panicked { .. } => "task_panicked",
            TaskError::Config(_) => "task_config",
            TaskError::Stream(_) => "task_stream",
            TaskError::Io(_) => "task_io",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TaskError::Fail { error } => format!("error: {error}"),
            TaskError::Panicked { info } => format!("panic: {info}"),
            TaskError::Config(e) => format!("config: {e}"),
            TaskError::Stream(e) => format!("stream: {e}"),
            TaskError::Io(e) => format!("io: {e}"),
        }
    }
}

/// # Errors reading a task's key/value configuration.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The key is absent.
    #[error("missing config key {key:?}")]
    Missing {
        /// The requested key.
        key: String,
    },

    /// The value could not be parsed into the requested type.
    #[error("invalid value {value:?} for config key {key:?}: {reason}")]
    Invalid {
        /// The requested key.
        key: String,
        /// The stored value.
        value: String,
        /// Parser error text.
        reason: String,
    },
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::Missing { .. } => "config_missing",
            ConfigError::Invalid { .. } => "config_invalid",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        self.to_string()
    }
}

/// # Errors acquiring or releasing stream resources.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum StreamError {
    /// A data file could not be opened or created.
    #[error("failed to open {path:?}: {source}")]
    Open {
        /// File that was being opened.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// The environment holds no stream of the requested direction.
    #[error("{stream} stream hasn't been opened")]
    NotOpen {
        /// `"input"` or `"output"`.
        stream: &'static str,
    },

    /// Buffered output could not be flushed on release.
    #[error("failed to flush output: {source}")]
    Flush {
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
}

impl StreamError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            StreamError::Open { .. } => "stream_open_failed",
            StreamError::NotOpen { .. } => "stream_not_open",
            StreamError::Flush { .. } => "stream_flush_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        self.to_string()
    }
}
