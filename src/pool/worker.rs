//! # Worker thread of a [`ThreadPool`](super::ThreadPool).
//!
//! ```text
//! spawn:
//!   running += 1, signal readiness (drop WaitGroup clone)
//!   loop {
//!     receive() ── Some(runner) ─► runner.call_with(publish TaskStarting)
//!              │                   (no-op, no events if someone else won)
//!              │                   publish TaskStopped | TaskFailed
//!              └── None (all senders gone, queue drained) ─► break
//!   }
//!   running -= 1
//! ```

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam_utils::sync::WaitGroup;

use crate::channel::Receiver;
use crate::events::{Event, EventKind};
use crate::subscribers::SubscriberSet;
use crate::tasks::RunnerRef;

/// Everything a worker needs from its pool.
pub(super) struct WorkerParams {
    pub(super) index: usize,
    pub(super) receiver: Receiver<RunnerRef>,
    pub(super) running: Arc<AtomicUsize>,
    pub(super) ready: WaitGroup,
    pub(super) subscribers: Option<Arc<SubscriberSet>>,
}

/// Handle of one worker thread.
pub(super) struct Worker {
    index: usize,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    /// Spawns the worker thread.
    pub(super) fn start(params: WorkerParams) -> io::Result<Self> {
        let index = params.index;
        let handle = thread::Builder::new()
            .name(format!("multigen-worker-{index}"))
            .spawn(move || run(params))?;
        Ok(Self {
            index,
            handle: Some(handle),
        })
    }

    /// Waits for the worker to exit. It exits by itself once the queue is closed and drained.
    pub(super) fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                eprintln!("[multigen] worker {} terminated abnormally", self.index);
            }
        }
    }
}

fn run(params: WorkerParams) {
    let WorkerParams {
        index,
        receiver,
        running,
        ready,
        subscribers,
    } = params;

    running.fetch_add(1, Ordering::AcqRel);
    drop(ready);

    while let Some(runner) = receiver.receive() {
        let Some(subs) = subscribers.as_deref() else {
            runner.call();
            continue;
        };

        let won = runner.call_with(|| {
            subs.emit(
                &Event::new(EventKind::TaskStarting)
                    .with_task(runner.name())
                    .with_worker(index),
            );
        });
        if !won {
            continue;
        }
        let ev = match runner.error() {
            None => Event::new(EventKind::TaskStopped),
            Some(e) => Event::new(EventKind::TaskFailed).with_reason(e.as_message()),
        };
        subs.emit(&ev.with_task(runner.name()).with_worker(index));
    }

    running.fetch_sub(1, Ordering::AcqRel);
}
