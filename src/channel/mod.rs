//! # Reference-counted multi-party channel.
//!
//! [`create`] returns a connected [`Sender`]/[`Receiver`] pair over one
//! unbounded FIFO queue. Both sides are **counted**: every live handle holds
//! exactly one unit of its side's count, so the channel can tell when *all*
//! producers are gone (receivers observe closure) and when *all* consumers are
//! gone (sends start failing).
//!
//! ## Architecture
//! ```text
//!   Sender ──┐                                   ┌──► Receiver
//!   Sender ──┼──► Shared { queue, senders, receivers } ──┼──► Receiver
//!   Sender ──┘        (Mutex + Condvar)          └──► Receiver
//! ```
//!
//! ## Rules
//! - `send` never blocks; it fails (returning the value) iff no receiver is alive.
//! - `receive` blocks until a value is queued, or returns `None` once every
//!   sender is gone **and** the queue is drained.
//! - `receive_for` additionally gives up after a timeout; callers that need
//!   "until closed" loop on it while [`Receiver::is_open`] holds.
//! - `share` (or `clone`) mints another handle on the same side; `reset`
//!   (or drop) releases it. The last sender to leave wakes every waiter.
//! - [`open`] mints a new sender from a receiver, for consumers that hand
//!   producer capability to tasks they do not otherwise own.
//!
//! ## Example
//! ```rust
//! use multigen::channel;
//!
//! let (tx, rx) = channel::create::<u32>();
//! let tx2 = tx.share();
//! tx.send(1).unwrap();
//! tx2.send(2).unwrap();
//! drop((tx, tx2));
//!
//! let got: Vec<u32> = rx.iter().collect();
//! assert_eq!(got, vec![1, 2]);
//! assert!(rx.receive().is_none());
//! ```

mod receiver;
mod sender;
mod shared;

pub use receiver::{Iter, Receiver};
pub use sender::{SendError, Sender};

use std::sync::Arc;

use shared::Shared;

/// Allocates a fresh channel with one sender and one receiver.
#[must_use]
pub fn create<T>() -> (Sender<T>, Receiver<T>) {
    let shared = Arc::new(Shared::new(1, 1));
    (
        Sender::from_shared(Arc::clone(&shared)),
        Receiver::from_shared(shared),
    )
}

/// Mints a new sender connected to `receiver`'s channel.
///
/// A released (empty) receiver yields an empty sender whose sends always fail.
#[must_use]
pub fn open<T>(receiver: &Receiver<T>) -> Sender<T> {
    receiver.open_sender()
}
