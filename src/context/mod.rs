//! # Execution context shared by the tasks of one group.
//!
//! A [`Context`] pairs the identity of a test case ([`CaseId`]) with its
//! key/value configuration ([`DataConfig`]). It is built once by the driver,
//! wrapped in an `Arc`, and handed read-only to every task of the
//! [`TaskGroup`](crate::TaskGroup) that owns it.
//!
//! ## Identity scheme
//! ```text
//! CaseId::Normal  { index: 3 }             ─► "3"
//! CaseId::Subtask { subtask: 1, index: 2 } ─► "1-2"
//! ```
//!
//! ## Example
//! ```rust
//! use multigen::{Context, DataConfig, entry};
//!
//! let ctx = Context::subtask(1, 2, DataConfig::from_iter([entry("a", 1), entry("b", 2)]));
//! assert_eq!(ctx.id().to_string(), "1-2");
//! assert_eq!(ctx.config().parse::<i64>("a").unwrap(), 1);
//! ```

mod case;
mod data_config;

pub use case::{CaseId, Context};
pub use data_config::{DataConfig, entry};
