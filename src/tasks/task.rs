//! # Context-bound tasks.
//!
//! A [`Task`] is the unit produced by a [`TaskGroup`](crate::TaskGroup)
//! factory. Before it is scheduled, the executor binds it to its group's
//! shared [`Context`] with [`BoundTask::new`]; the result is a [`Runnable`]
//! and therefore gets the call-once guarantee of [`Runner`](crate::Runner).
//!
//! ```text
//! factory() ─► Box<dyn Task> ─► BoundTask { task, Arc<Context> } ─► Runner ─► pool
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::context::Context;
use crate::error::TaskError;
use crate::tasks::runner::Runnable;

/// # Unit of work that reads a shared execution context.
///
/// `run` receives `&mut self`, so a task may keep scratch state (an RNG, a
/// result buffer) without its own locking; it is invoked at most once.
///
/// # Example
/// ```
/// use multigen::{Context, DataConfig, Task, TaskError, entry};
///
/// struct Sum(i64);
///
/// impl Task for Sum {
///     fn run(&mut self, ctx: &Context) -> Result<(), TaskError> {
///         self.0 = ctx.config().parse::<i64>("a")? + ctx.config().parse::<i64>("b")?;
///         Ok(())
///     }
/// }
///
/// let ctx = Context::normal(0, DataConfig::from_iter([entry("a", 1), entry("b", 2)]));
/// let mut task = Sum(0);
/// task.run(&ctx).unwrap();
/// assert_eq!(task.0, 3);
/// ```
pub trait Task: Send + 'static {
    /// Executes the task against its group's context.
    fn run(&mut self, ctx: &Context) -> Result<(), TaskError>;

    /// Human-readable name (for events and summaries).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Owned, type-erased task as returned by group factories.
pub type BoxTask = Box<dyn Task>;

/// Closure-backed [`Task`].
///
/// ## Example
/// ```rust
/// use multigen::{BoxTask, Context, TaskFn};
///
/// let task: BoxTask = TaskFn::boxed("print", |ctx: &Context| {
///     let _ = ctx.id();
///     Ok(())
/// });
/// assert_eq!(task.name(), "print");
/// ```
#[derive(Debug)]
pub struct TaskFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> TaskFn<F> {
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> TaskFn<F>
where
    F: FnMut(&Context) -> Result<(), TaskError> + Send + 'static,
{
    /// Creates the task already boxed, ready to return from a factory.
    pub fn boxed(name: impl Into<Cow<'static, str>>, f: F) -> BoxTask {
        Box::new(Self::new(name, f))
    }
}

impl<F> Task for TaskFn<F>
where
    F: FnMut(&Context) -> Result<(), TaskError> + Send + 'static,
{
    fn run(&mut self, ctx: &Context) -> Result<(), TaskError> {
        (self.f)(ctx)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A task bound to its group's shared context; the body the pool actually runs.
///
/// The name is captured at bind time as `"{task}#{case id}"`.
pub struct BoundTask {
    name: String,
    ctx: Arc<Context>,
    task: Mutex<BoxTask>,
}

impl BoundTask {
    pub fn new(task: BoxTask, ctx: Arc<Context>) -> Self {
        let name = format!("{}#{}", task.name(), ctx.id());
        Self {
            name,
            ctx,
            task: Mutex::new(task),
        }
    }

    /// The bound execution context.
    pub fn context(&self) -> &Arc<Context> {
        &self.ctx
    }
}

impl Runnable for BoundTask {
    fn run(&self) -> Result<(), TaskError> {
        self.task.lock().run(&self.ctx)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{DataConfig, entry};
    use crate::tasks::runner::{Runner, Status};

    #[test]
    fn test_bound_task_reads_shared_context() {
        let ctx = Arc::new(Context::subtask(
            1,
            3,
            DataConfig::from_iter([entry("result", "successful test")]),
        ));
        let (tx, rx) = crate::channel::create::<String>();
        let task = TaskFn::boxed("echo", move |ctx: &Context| {
            let value = ctx.config().get("result").unwrap_or_default();
            tx.send(format!("echo: {value}"))
                .map_err(|e| TaskError::fail(e.to_string()))
        });

        let runner = Runner::new(BoundTask::new(task, Arc::clone(&ctx)));
        assert_eq!(runner.name(), "echo#1-3");
        assert!(Arc::ptr_eq(runner.body().context(), &ctx));
        assert!(runner.call());
        drop(runner);

        assert_eq!(rx.receive().as_deref(), Some("echo: successful test"));
        assert_eq!(rx.receive(), None);
    }

    #[test]
    fn test_task_failure_lands_on_runner() {
        let ctx = Arc::new(Context::normal(0, DataConfig::new()));
        let task = TaskFn::boxed("needs-n", |ctx: &Context| {
            ctx.config().parse::<u32>("n")?;
            Ok(())
        });
        let runner = Runner::new(BoundTask::new(task, ctx));
        assert!(runner.call());
        assert_eq!(runner.status(), Status::Finished);
        assert_eq!(runner.error().map(TaskError::as_label), Some("task_config"));
    }
}
