//! # Core subscriber trait
//!
//! `Subscribe` is the extension point for plugging custom event handlers into
//! the pool and executor. Each subscriber is driven by a dedicated thread fed
//! by its own queue owned by the [`SubscriberSet`](crate::SubscriberSet).
//!
//! ## Contract
//! - Implementations may be slow (file I/O, batching); they do **not** block
//!   the workers publishing events nor other subscribers.
//! - A panic inside `on_event` is caught and reported; the subscriber keeps
//!   receiving later events.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use multigen::{Event, EventKind, Subscribe};
//!
//! #[derive(Default)]
//! struct FailureCounter(AtomicUsize);
//!
//! impl Subscribe for FailureCounter {
//!     fn on_event(&self, ev: &Event) {
//!         if ev.kind == EventKind::TaskFailed {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "failure-counter"
//!     }
//! }
//! ```

use crate::events::Event;

/// Contract for event subscribers.
///
/// Called from a subscriber-dedicated thread, one event at a time, in
/// publication order for that subscriber.
pub trait Subscribe: Send + Sync + 'static {
    /// Handle a single event for this subscriber.
    fn on_event(&self, event: &Event);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
