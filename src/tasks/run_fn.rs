//! # Function-backed runner body (`RunFn`)
//!
//! [`RunFn`] wraps a closure `F: Fn() -> Result<(), TaskError>` so ad-hoc work
//! can be submitted to a [`ThreadPool`](crate::ThreadPool) without a dedicated type.
//!
//! ## Example
//! ```rust
//! use multigen::{RunFn, Runner, TaskError};
//!
//! let runner = Runner::arc(RunFn::new("noop", || Ok::<_, TaskError>(())));
//! assert_eq!(runner.name(), "noop");
//! assert!(runner.call());
//! ```

use std::borrow::Cow;

use crate::error::TaskError;
use crate::tasks::runner::Runnable;

/// Closure-backed [`Runnable`].
#[derive(Debug)]
pub struct RunFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> RunFn<F> {
    /// Creates a named closure body.
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> Runnable for RunFn<F>
where
    F: Fn() -> Result<(), TaskError> + Send + Sync + 'static,
{
    fn run(&self) -> Result<(), TaskError> {
        (self.f)()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
