use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::component::{
    GenerateTask, Generator, IntegratedGenerator, IntegratedTask, Solution, SolveTask, Target,
};
use crate::config::Config;
use crate::context::Context;
use crate::error::{PoolError, TaskError};
use crate::executor::{Summary, TaskExecutor};
use crate::subscribers::SubscriberSet;
use crate::tasks::{BoxTask, Task, TaskGroup};

/// Builds a phase task for a given target.
type Maker = Arc<dyn Fn(&Target) -> BoxTask + Send + Sync>;

/// One registered test case.
struct Case {
    context: Arc<Context>,
    generate: Maker,
    solve: Option<Maker>,
}

/// Catalogue of test cases for one problem.
///
/// # Example
/// ```
/// use std::io::{BufRead, Write};
/// use multigen::{Context, DataConfig, Generator, Solution, TaskError, Template, entry};
///
/// #[derive(Default)]
/// struct Gen;
///
/// impl Generator for Gen {
///     fn generate(&mut self, data: &mut dyn Write, cfg: &DataConfig) -> Result<(), TaskError> {
///         writeln!(data, "{}", cfg.get_or("n", "0"))?;
///         Ok(())
///     }
/// }
///
/// #[derive(Default)]
/// struct Double;
///
/// impl Solution for Double {
///     fn solve(
///         &mut self,
///         input: &mut dyn BufRead,
///         output: &mut dyn Write,
///         _: &DataConfig,
///     ) -> Result<(), TaskError> {
///         let mut line = String::new();
///         input.read_line(&mut line)?;
///         let n: i64 = line.trim().parse().map_err(|_| TaskError::fail("not a number"))?;
///         writeln!(output, "{}", n * 2)?;
///         Ok(())
///     }
/// }
///
/// let dir = tempfile::tempdir().unwrap();
/// let mut template = Template::new("double");
/// template.output_dir(dir.path());
/// for i in 1..=5 {
///     template.add::<Gen, Double>(Context::normal(i, DataConfig::from_iter([entry("n", i)])));
/// }
///
/// let summary = template.execute(2).unwrap();
/// assert_eq!(summary.total, 10);
/// assert!(summary.is_success());
/// assert_eq!(std::fs::read_to_string(dir.path().join("double3.out")).unwrap(), "6\n");
/// ```
pub struct Template {
    problem: Arc<str>,
    config: Config,
    cases: Vec<Case>,
    subscribers: Option<Arc<SubscriberSet>>,
}

impl Template {
    /// Empty catalogue for `problem`, writing into the current directory.
    pub fn new(problem: impl Into<Arc<str>>) -> Self {
        Self {
            problem: problem.into(),
            config: Config::default(),
            cases: Vec::new(),
            subscribers: None,
        }
    }

    /// Directory receiving the data files of [`execute`](Self::execute). Must exist.
    pub fn output_dir(&mut self, dir: impl Into<std::path::PathBuf>) -> &mut Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Publishes pool and task events of both phases to `subscribers`.
    pub fn with_subscribers(&mut self, subscribers: Arc<SubscriberSet>) -> &mut Self {
        self.subscribers = Some(subscribers);
        self
    }

    /// Registers a case generated by `G` and answered by `S`.
    pub fn add<G, S>(&mut self, context: Context) -> &mut Self
    where
        G: Generator + Default,
        S: Solution + Default,
    {
        self.add_with(context, G::default, S::default)
    }

    /// Registers a case whose components are built by the given factories.
    pub fn add_with<G, S, FG, FS>(&mut self, context: Context, generator: FG, solution: FS) -> &mut Self
    where
        G: Generator,
        S: Solution,
        FG: Fn() -> G + Send + Sync + 'static,
        FS: Fn() -> S + Send + Sync + 'static,
    {
        self.cases.push(Case {
            context: Arc::new(context),
            generate: Arc::new(move |t: &Target| -> BoxTask {
                Box::new(GenerateTask::new(t.clone(), generator()))
            }),
            solve: Some(Arc::new(move |t: &Target| -> BoxTask {
                Box::new(SolveTask::new(t.clone(), solution()))
            })),
        });
        self
    }

    /// Registers a case whose input and answer are both written by `I`.
    pub fn add_integrated<I>(&mut self, context: Context) -> &mut Self
    where
        I: IntegratedGenerator + Default,
    {
        self.cases.push(Case {
            context: Arc::new(context),
            generate: Arc::new(|t: &Target| -> BoxTask {
                Box::new(IntegratedTask::new(t.clone(), I::default()))
            }),
            solve: None,
        });
        self
    }

    /// Number of registered cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Runs every case on `workers` threads into the configured output directory.
    ///
    /// # Errors
    /// Pool usage errors, e.g. [`PoolError::InvalidWorkerCount`] for `0`.
    pub fn execute(&self, workers: usize) -> Result<Summary, PoolError> {
        if workers == 0 {
            return Err(PoolError::InvalidWorkerCount { count: workers });
        }
        self.run(&self.config.clone().with_workers(workers))
    }

    /// Runs every case with an explicit configuration (its output directory
    /// replaces the one set by [`output_dir`](Self::output_dir)).
    ///
    /// # Errors
    /// Pool usage errors.
    pub fn execute_with(&self, config: &Config) -> Result<Summary, PoolError> {
        self.run(config)
    }

    fn run(&self, config: &Config) -> Result<Summary, PoolError> {
        let target = Target::new(Arc::clone(&self.problem), config.output_dir.clone());
        let workers = config.worker_count();
        let executor = match &self.subscribers {
            Some(subs) => TaskExecutor::with_subscribers(Arc::clone(subs)),
            None => TaskExecutor::new(),
        };

        let generated: Vec<Arc<AtomicBool>> =
            self.cases.iter().map(|_| Arc::new(AtomicBool::new(false))).collect();

        let phase1: Vec<TaskGroup> = self
            .cases
            .iter()
            .zip(&generated)
            .map(|(case, done)| {
                let group = TaskGroup::with_shared(Arc::clone(&case.context));
                let make = Arc::clone(&case.generate);
                let target = target.clone();
                let done = Arc::clone(done);
                group.add(move || -> BoxTask {
                    Box::new(MarkOnSuccess {
                        inner: make(&target),
                        done: Arc::clone(&done),
                    })
                });
                group
            })
            .collect();
        let mut summary = executor.execute(&phase1, workers)?;

        let phase2: Vec<TaskGroup> = self
            .cases
            .iter()
            .zip(&generated)
            .filter(|(_, done)| done.load(Ordering::Acquire))
            .filter_map(|(case, _)| {
                let make = Arc::clone(case.solve.as_ref()?);
                let group = TaskGroup::with_shared(Arc::clone(&case.context));
                let target = target.clone();
                group.add(move || make(&target));
                Some(group)
            })
            .collect();
        if !phase2.is_empty() {
            summary.merge(executor.execute(&phase2, workers)?);
        }
        Ok(summary)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("problem", &self.problem)
            .field("config", &self.config)
            .field("cases", &self.cases.len())
            .finish()
    }
}

/// Generate-phase wrapper recording whether its case may be solved.
struct MarkOnSuccess {
    inner: BoxTask,
    done: Arc<AtomicBool>,
}

impl Task for MarkOnSuccess {
    fn run(&mut self, ctx: &Context) -> Result<(), TaskError> {
        self.inner.run(ctx)?;
        self.done.store(true, Ordering::Release);
        Ok(())
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
