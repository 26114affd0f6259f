use std::fmt;
use std::sync::Arc;

use super::shared::Shared;

/// Producer handle of a channel.
///
/// Holds one unit of the channel's sender count until [`reset`](Sender::reset)
/// or drop. A default-constructed sender is empty: it belongs to no channel
/// and every send fails.
pub struct Sender<T> {
    shared: Option<Arc<Shared<T>>>,
}

/// Returned by [`Sender::send`] when no receiver is alive; carries the value back.
#[derive(PartialEq, Eq, Clone, Copy)]
pub struct SendError<T>(pub T);

impl<T> Sender<T> {
    pub(crate) fn from_shared(shared: Arc<Shared<T>>) -> Self {
        Self {
            shared: Some(shared),
        }
    }

    /// Enqueues `value` without blocking.
    ///
    /// Fails iff, at the instant of the call, the receiver count is zero
    /// (or this handle is empty); nothing is enqueued in that case.
    pub fn send(&self, value: T) -> Result<(), SendError<T>> {
        match &self.shared {
            Some(shared) => shared.push(value).map_err(SendError),
            None => Err(SendError(value)),
        }
    }

    /// Returns another sender on the same channel, incrementing the sender count.
    #[must_use]
    pub fn share(&self) -> Self {
        if let Some(shared) = &self.shared {
            shared.add_sender();
        }
        Self {
            shared: self.shared.clone(),
        }
    }

    /// Releases this handle. The last sender to leave wakes all blocked receivers.
    ///
    /// Calling `reset` on an already-empty handle is a no-op.
    pub fn reset(&mut self) {
        if let Some(shared) = self.shared.take() {
            shared.release_sender();
        }
    }

    /// Number of live receivers (0 for an empty handle).
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.shared.as_ref().map_or(0, |s| s.lock().receivers)
    }

    /// Number of live senders, this one included (0 for an empty handle).
    #[must_use]
    pub fn sender_count(&self) -> usize {
        self.shared.as_ref().map_or(0, |s| s.lock().senders)
    }

    /// True while at least one receiver could still observe a send.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.receiver_count() > 0
    }
}

impl<T> Clone for Sender<T> {
    fn clone(&self) -> Self {
        self.share()
    }
}

impl<T> Default for Sender<T> {
    fn default() -> Self {
        Self { shared: None }
    }
}

impl<T> Drop for Sender<T> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T> fmt::Debug for Sender<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sender")
            .field("attached", &self.shared.is_some())
            .finish()
    }
}

impl<T> fmt::Debug for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendError").finish_non_exhaustive()
    }
}

impl<T> fmt::Display for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("sending on a channel with no receivers")
    }
}

impl<T> std::error::Error for SendError<T> {}
