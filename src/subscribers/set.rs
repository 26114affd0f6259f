//! # SubscriberSet: one queue and one thread per subscriber.
//!
//! ```text
//!    emit(&Event) ── Arc<Event> ──┬──► [channel] ─► thread "multigen-sub-A" ─► A.on_event()
//!                                 ├──► [channel] ─► thread "multigen-sub-B" ─► B.on_event()
//!                                 └──► [channel] ─► thread "multigen-sub-N" ─► N.on_event()
//! ```
//!
//! ## Rules
//! - `emit` only enqueues; a slow subscriber never stalls a worker.
//! - Each subscriber sees events in emission order. Subscribers are not
//!   synchronized with each other.
//! - Panics inside subscribers are caught, reported on stderr and forwarded
//!   to the other subscribers as [`EventKind::SubscriberPanicked`](crate::EventKind).
//! - `close` (or drop) hands every already emitted event to its subscriber
//!   before the threads are joined.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use crate::channel::{self, Sender};
use crate::events::{Event, EventKind};
use crate::tasks::panic_message;

use super::Subscribe;

/// Queue feeding one subscriber thread.
struct SubscriberChannel {
    name: &'static str,
    sender: Sender<Arc<Event>>,
}

struct Inner {
    channels: Vec<SubscriberChannel>,
    workers: Vec<JoinHandle<()>>,
}

/// Composite fan-out with per-subscriber queues and worker threads.
pub struct SubscriberSet {
    inner: Arc<Mutex<Inner>>,
}

impl SubscriberSet {
    /// Creates a new set and spawns one thread per subscriber.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        let inner = Arc::new(Mutex::new(Inner {
            channels: Vec::with_capacity(subs.len()),
            workers: Vec::with_capacity(subs.len()),
        }));

        for sub in subs {
            let name = sub.name();
            let (tx, rx) = channel::create::<Arc<Event>>();
            let set = Arc::downgrade(&inner);

            let spawned = thread::Builder::new()
                .name(format!("multigen-sub-{name}"))
                .spawn(move || {
                    while let Some(ev) = rx.receive() {
                        if let Err(payload) =
                            panic::catch_unwind(AssertUnwindSafe(|| sub.on_event(&ev)))
                        {
                            let reason = panic_message(payload.as_ref());
                            eprintln!("[multigen] subscriber '{name}' panicked: {reason}");
                            if ev.kind != EventKind::SubscriberPanicked {
                                report_panic(&set, name, reason);
                            }
                        }
                    }
                });

            let mut guard = inner.lock();
            match spawned {
                Ok(handle) => {
                    guard.channels.push(SubscriberChannel { name, sender: tx });
                    guard.workers.push(handle);
                }
                Err(e) => {
                    eprintln!("[multigen] subscriber '{name}' disabled: failed to spawn worker: {e}");
                }
            }
        }

        Self { inner }
    }

    /// Enqueues `event` for every subscriber.
    ///
    /// Events emitted after [`close`](Self::close) are dropped.
    pub fn emit(&self, event: &Event) {
        let ev = Arc::new(event.clone());
        let inner = self.inner.lock();
        for channel in &inner.channels {
            if channel.sender.send(Arc::clone(&ev)).is_err() {
                eprintln!(
                    "[multigen] subscriber '{}' dropped event: worker closed",
                    channel.name
                );
            }
        }
    }

    /// Graceful shutdown: close all queues and wait until every queued event was handled.
    ///
    /// Idempotent.
    pub fn close(&self) {
        let workers = {
            let mut inner = self.inner.lock();
            inner.channels.clear();
            std::mem::take(&mut inner.workers)
        };
        for h in workers {
            let _ = h.join();
        }
    }

    /// True if there are no (live) subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().channels.is_empty()
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().channels.len()
    }
}

/// Forwards a subscriber panic to every other subscriber still attached.
fn report_panic(set: &Weak<Mutex<Inner>>, name: &'static str, reason: String) {
    let Some(inner) = set.upgrade() else {
        return;
    };
    let ev = Arc::new(Event::subscriber_panicked(name, reason));
    let inner = inner.lock();
    for channel in inner.channels.iter().filter(|c| c.name != name) {
        let _ = channel.sender.send(Arc::clone(&ev));
    }
}

impl Drop for SubscriberSet {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<u64>>,
        kinds: Mutex<Vec<EventKind>>,
    }

    impl Subscribe for Recorder {
        fn on_event(&self, ev: &Event) {
            self.seen.lock().push(ev.seq);
            self.kinds.lock().push(ev.kind);
        }

        fn name(&self) -> &'static str {
            "recorder"
        }
    }

    struct Panicky;

    impl Subscribe for Panicky {
        fn on_event(&self, ev: &Event) {
            if ev.kind == EventKind::TaskFailed {
                panic!("cannot handle failures");
            }
        }
    }

    #[test]
    fn test_close_delivers_everything_in_order() {
        let rec = Arc::new(Recorder::default());
        let set = SubscriberSet::new(vec![rec.clone() as Arc<dyn Subscribe>]);
        assert_eq!(set.len(), 1);

        let evs: Vec<Event> = (0..50).map(|_| Event::new(EventKind::TaskStopped)).collect();
        for ev in &evs {
            set.emit(ev);
        }
        set.close();

        let expected: Vec<u64> = evs.iter().map(|e| e.seq).collect();
        assert_eq!(*rec.seen.lock(), expected);
        assert!(set.is_empty());
        set.close();
    }

    #[test]
    fn test_panicking_subscriber_is_isolated() {
        let rec = Arc::new(Recorder::default());
        let set = SubscriberSet::new(vec![
            Arc::new(Panicky) as Arc<dyn Subscribe>,
            rec.clone() as Arc<dyn Subscribe>,
        ]);

        set.emit(&Event::new(EventKind::TaskFailed));
        set.emit(&Event::new(EventKind::TaskStopped));
        drop(set);

        let seen = rec.kinds.lock();
        assert_eq!(seen.iter().filter(|k| **k != EventKind::SubscriberPanicked).count(), 2);
        assert!(seen.len() <= 3);
    }
}
