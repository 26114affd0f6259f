//! # Components: problem-specific generators and solutions.
//!
//! A component only sees streams and its case's [`DataConfig`](crate::DataConfig).
//! Its adapter owns everything else: data-file naming, opening the files,
//! flushing and releasing them on every exit path.
//!
//! ```text
//! GenerateTask<G>    ──► G::generate(                 {dir}/{problem}{id}.in ,  config)
//! SolveTask<S>       ──► S::solve(   {dir}/{problem}{id}.in, {..}{id}.out   ,  config)
//! IntegratedTask<I>  ──► I::generate({dir}/{problem}{id}.in, {..}{id}.out   ,  config)
//! ```
//!
//! File names follow the case id: problem `add`, subtask 1, case 2 gives
//! `add1-2.in` / `add1-2.out`; normal case 3 gives `add3.in` / `add3.out`.

mod generate;
mod integrated;
mod solve;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::context::CaseId;

pub use generate::{GenerateTask, Generator};
pub use integrated::{IntegratedGenerator, IntegratedTask};
pub use solve::{Solution, SolveTask};

/// Where a case's data file lives: `{dir}/{problem}{id}.{ext}`.
///
/// # Example
/// ```
/// use std::path::Path;
/// use multigen::{CaseId, data_path};
///
/// let p = data_path(Path::new("out"), "add", CaseId::Subtask { subtask: 1, index: 2 }, "in");
/// assert_eq!(p, Path::new("out").join("add1-2.in"));
/// ```
pub fn data_path(dir: &Path, problem: &str, id: CaseId, ext: &str) -> PathBuf {
    dir.join(format!("{problem}{id}.{ext}"))
}

/// Problem name and output directory shared by every adapter of a template.
#[derive(Clone, Debug)]
pub struct Target {
    problem: Arc<str>,
    dir: Arc<Path>,
}

impl Target {
    pub fn new(problem: impl Into<Arc<str>>, dir: impl Into<PathBuf>) -> Self {
        let dir: PathBuf = dir.into();
        Self {
            problem: problem.into(),
            dir: Arc::from(dir),
        }
    }

    #[inline]
    pub fn problem(&self) -> &str {
        &self.problem
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Input data file of case `id`.
    pub fn input_path(&self, id: CaseId) -> PathBuf {
        data_path(&self.dir, &self.problem, id, "in")
    }

    /// Answer file of case `id`.
    pub fn output_path(&self, id: CaseId) -> PathBuf {
        data_path(&self.dir, &self.problem, id, "out")
    }
}

/// Last path segment of a type name, generics stripped: `demo::AddGenerator` -> `AddGenerator`.
fn short_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_path_follows_case_id() {
        let dir = Path::new("data");
        assert_eq!(
            data_path(dir, "graph", CaseId::Normal { index: 3 }, "out"),
            dir.join("graph3.out")
        );

        let target = Target::new("add", "data");
        let id = CaseId::Subtask { subtask: 1, index: 1 };
        assert_eq!(target.input_path(id), dir.join("add1-1.in"));
        assert_eq!(target.output_path(id), dir.join("add1-1.out"));
        assert_eq!(target.problem(), "add");
    }

    #[test]
    fn test_short_name_strips_path_and_generics() {
        assert_eq!(short_name::<testing::AddGenerator>(), "AddGenerator");
        assert_eq!(short_name::<Vec<u8>>(), "Vec");
    }
}
