//! Batch execution of task groups.
//!
//! ## Contents
//! - [`TaskExecutor`] drains groups into a fresh pool and blocks until the batch is done
//! - [`Summary`], [`TaskFailure`] what happened to the batch

mod summary;
mod task_executor;

pub use summary::{Summary, TaskFailure};
pub use task_executor::TaskExecutor;
