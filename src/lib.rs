//! # multigen
//!
//! **multigen** produces and validates bulk test data (e.g. competitive
//! programming test cases) by running many independent *generate* and
//! *solve* jobs in parallel on a bounded pool of OS threads.
//!
//! The domain side is small: a generator writes a case's input file, a
//! solution reads it and writes the expected answer. The crate's weight is in
//! the execution core underneath: a reference-counted multi-party channel, a
//! worker pool draining it, a call-once runner, and an executor that fans
//! grouped tasks out over the pool and blocks until the batch is done.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  TaskGroup   │   │  TaskGroup   │   │  TaskGroup   │
//!     │ (Context #1) │   │ (Context #2) │   │ (Context #3) │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ next()           │ next()           │ next()
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  TaskExecutor::execute(groups, workers)                           │
//! │  - factory() ─► BoundTask(task, Arc<Context>) ─► Runner           │
//! │  - ThreadPool::execute(runner) for every entry of every group     │
//! │  - ThreadPool::stop() (drain + join) ─► Summary                   │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                    ┌──────────────────────────────┐
//!                    │  Channel<RunnerRef>          │
//!                    │  (pool holds the only Sender)│
//!                    └───┬──────────┬──────────┬────┘
//!                        ▼          ▼          ▼
//!                     Worker 0   Worker 1   Worker N ──► runner.call()
//!                        │          │          │          (at most once)
//!                        └──────────┴──────────┴──► SubscriberSet (optional)
//!                                                   TaskStarting / TaskStopped / TaskFailed
//! ```
//!
//! ### Runner lifecycle
//! ```text
//! Pending ──call() wins CAS──► Running ──body returns / panics──► Finished
//!    │                                                              │
//!    └── every other call() returns false, no side effects          └── error() = Some(..) on failure
//! ```
//!
//! ### Template phases
//! ```text
//! Template ──► phase 1: TaskExecutor(generate groups) ──► {problem}{id}.in
//!          ──► phase 2: TaskExecutor(solve groups)    ──► {problem}{id}.out
//! ```
//!
//! ## Features
//! | Area              | Description                                                 | Key types / traits                          |
//! |-------------------|-------------------------------------------------------------|---------------------------------------------|
//! | **Channel**       | Counted multi-producer multi-consumer queue                 | [`channel::create`], [`Sender`], [`Receiver`] |
//! | **Execution**     | Call-once runners, worker pool, batch executor              | [`Runner`], [`ThreadPool`], [`TaskExecutor`]  |
//! | **Tasks**         | Context-bound work grouped by shared context                | [`Task`], [`TaskFn`], [`TaskGroup`]           |
//! | **Components**    | Problem generators and solutions over streams               | [`Generator`], [`Solution`], [`IntegratedGenerator`] |
//! | **Driver**        | Catalogue of cases run as generate then solve               | [`Template`]                                |
//! | **Subscriber API**| Hook into pool and task lifecycle events                    | [`Subscribe`], [`SubscriberSet`]            |
//! | **Errors**        | Typed errors for pool usage, tasks, config, streams         | [`PoolError`], [`TaskError`]                |
//! | **Configuration** | Worker count and output directory                           | [`Config`]                                  |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use multigen::{channel, Context, DataConfig, TaskError, TaskExecutor, TaskFn, TaskGroup, entry};
//!
//! let (tx, results) = channel::create::<i64>();
//! drop(tx);
//!
//! let group = TaskGroup::new(Context::normal(1, DataConfig::from_iter([entry("a", 1), entry("b", 2)])));
//! let rx = results.share();
//! group.add(move || {
//!     let out = channel::open(&rx);
//!     TaskFn::boxed("sum", move |ctx: &Context| {
//!         let sum = ctx.config().parse::<i64>("a")? + ctx.config().parse::<i64>("b")?;
//!         out.send(sum).map_err(|e| TaskError::fail(e.to_string()))
//!     })
//! });
//!
//! let summary = TaskExecutor::new().execute(&[group], 8)?;
//! assert!(summary.is_success());
//! assert_eq!(results.iter().collect::<Vec<_>>(), vec![3]);
//! # Ok::<(), multigen::PoolError>(())
//! ```

pub mod channel;

mod component;
mod config;
mod context;
mod error;
mod events;
mod executor;
mod pool;
mod stream;
mod subscribers;
mod tasks;
mod template;

// ---- Public re-exports ----

pub use channel::{Receiver, SendError, Sender};
pub use component::{
    GenerateTask, Generator, IntegratedGenerator, IntegratedTask, Solution, SolveTask, Target,
    data_path,
};
pub use config::Config;
pub use context::{CaseId, Context, DataConfig, entry};
pub use error::{ConfigError, PoolError, StreamError, TaskError};
pub use events::{Event, EventKind};
pub use executor::{Summary, TaskExecutor, TaskFailure};
pub use pool::ThreadPool;
pub use stream::{Environment, Input, Output};
pub use subscribers::{Subscribe, SubscriberSet};
pub use tasks::{
    BoundTask, BoxTask, Entry, RunFn, Runnable, Runner, RunnerRef, Status, Task, TaskFactory,
    TaskFn, TaskGroup,
};
pub use template::Template;

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
