//! # Units of work and how they are grouped.
//!
//! This module provides the work-side types:
//! - [`Runnable`] / [`Runner`] - call-once wrapper with an atomic `Pending → Running → Finished` state
//! - [`RunFn`] - closure-backed runnable
//! - [`Task`] / [`TaskFn`] / [`BoxTask`] - work that reads a shared [`Context`](crate::Context)
//! - [`BoundTask`] - a task bound to its context, runnable by the pool
//! - [`TaskGroup`] - ordered factories sharing one context, drainable concurrently

mod group;
mod run_fn;
mod runner;
mod task;

pub(crate) use runner::panic_message;

pub use group::{Entry, TaskFactory, TaskGroup};
pub use run_fn::RunFn;
pub use runner::{Runnable, Runner, RunnerRef, Status};
pub use task::{BoundTask, BoxTask, Task, TaskFn};
