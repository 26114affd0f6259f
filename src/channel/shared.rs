//! Shared state behind every handle of one channel.

use std::collections::VecDeque;
use std::time::Instant;

use parking_lot::{Condvar, Mutex, MutexGuard};

/// Queue plus per-side handle counts. Only mutated under [`Shared::state`].
pub(crate) struct State<T> {
    pub(crate) queue: VecDeque<T>,
    pub(crate) senders: usize,
    pub(crate) receivers: usize,
}

pub(crate) struct Shared<T> {
    state: Mutex<State<T>>,
    /// Signaled on push (one waiter) and when the sender count hits zero (all).
    ready: Condvar,
}

impl<T> Shared<T> {
    pub(crate) fn new(senders: usize, receivers: usize) -> Self {
        Self {
            state: Mutex::new(State {
                queue: VecDeque::new(),
                senders,
                receivers,
            }),
            ready: Condvar::new(),
        }
    }

    #[inline]
    pub(crate) fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock()
    }

    /// Pushes `value` unless every receiver is gone.
    pub(crate) fn push(&self, value: T) -> Result<(), T> {
        let mut st = self.state.lock();
        if st.receivers == 0 {
            return Err(value);
        }
        st.queue.push_back(value);
        drop(st);
        self.ready.notify_one();
        Ok(())
    }

    /// Blocks until a value is available or the channel is closed and drained.
    pub(crate) fn pop(&self) -> Option<T> {
        let mut st = self.state.lock();
        loop {
            if let Some(v) = st.queue.pop_front() {
                return Some(v);
            }
            if st.senders == 0 {
                return None;
            }
            self.ready.wait(&mut st);
        }
    }

    /// Like [`pop`](Self::pop), but gives up at `deadline`.
    pub(crate) fn pop_until(&self, deadline: Instant) -> Option<T> {
        let mut st = self.state.lock();
        loop {
            if let Some(v) = st.queue.pop_front() {
                return Some(v);
            }
            if st.senders == 0 {
                return None;
            }
            if self.ready.wait_until(&mut st, deadline).timed_out() {
                return st.queue.pop_front();
            }
        }
    }

    pub(crate) fn try_pop(&self) -> Option<T> {
        self.state.lock().queue.pop_front()
    }

    pub(crate) fn add_sender(&self) {
        self.state.lock().senders += 1;
    }

    pub(crate) fn add_receiver(&self) {
        self.state.lock().receivers += 1;
    }

    pub(crate) fn release_sender(&self) {
        let mut st = self.state.lock();
        st.senders -= 1;
        let closed = st.senders == 0;
        drop(st);
        if closed {
            self.ready.notify_all();
        }
    }

    pub(crate) fn release_receiver(&self) {
        self.state.lock().receivers -= 1;
    }
}
