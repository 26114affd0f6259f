//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out
//! that drives subscribers on their own threads, and built-in implementations.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Worker / ThreadPool / TaskExecutor ── emit(&Event) ──► SubscriberSet
//!                                                              │
//!                                              ┌───────────────┼───────────────┐
//!                                              ▼               ▼               ▼
//!                                          LogWriter        Metrics         Custom
//! ```
//!
//! ## Built-in subscribers
//! - `LogWriter` (feature `logging`) prints one line per event to stdout.

mod embedded;
mod set;
mod subscribe;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
