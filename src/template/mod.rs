//! # Template: the driver that turns a catalogue of cases into data files.
//!
//! ```text
//! Template::new("add")
//!   .add::<Gen, Sol>(case 1-1) ─┐
//!   .add::<Gen, Sol>(case 1-2) ─┼─► one TaskGroup per case (case context = group context)
//!   .add_integrated::<I>(2-1)  ─┘
//!
//! execute(workers):
//!   phase 1: TaskExecutor::execute(generate groups)   writes *.in  (integrated: *.in + *.out)
//!   phase 2: TaskExecutor::execute(solve groups)      reads *.in, writes *.out
//!   Summary = phase 1 ∪ phase 2
//! ```
//!
//! ## Rules
//! - A solve reads the file its generate wrote, so phase 2 starts only after
//!   phase 1 has fully completed.
//! - A case whose generator failed is not solved; the generator failure is
//!   already in the summary.

mod driver;

pub use driver::Template;
