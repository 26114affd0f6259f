//! Runtime events: the data model observed by subscribers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//!
//! ## Quick reference
//! - **Publishers**: `ThreadPool` (pool lifecycle), workers (task lifecycle),
//!   `TaskExecutor` (batch submitted), `SubscriberSet` workers (subscriber panic).
//! - **Consumers**: user subscribers via [`SubscriberSet`](crate::SubscriberSet).

mod event;

pub use event::{Event, EventKind};
