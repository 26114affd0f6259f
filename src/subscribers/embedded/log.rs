//! # Stdout event printer.
//!
//! [`LogWriter`] prints one line per [`Event`]; meant for demos and debugging.
//!
//! ```text
//! [pool-started] workers=8
//! [starting] task="AddGenerator#3" worker=2
//! [failed] task="AddSolution#4" worker=0 err="config: missing config key \"a\""
//! [stopped] task="AddGenerator#3" worker=2
//! [batch-submitted] tasks=20
//! [pool-stopped] workers=8
//! ```

use crate::events::{Event, EventKind};

use super::super::Subscribe;

/// Prints every event to stdout.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Subscribe for LogWriter {
    fn on_event(&self, e: &Event) {
        let task = e.task.as_deref().unwrap_or("unknown");
        match e.kind {
            EventKind::PoolStarted => {
                println!("[pool-started] workers={}", e.count.unwrap_or_default());
            }
            EventKind::PoolStopped => {
                println!("[pool-stopped] workers={}", e.count.unwrap_or_default());
            }
            EventKind::BatchSubmitted => {
                println!("[batch-submitted] tasks={}", e.count.unwrap_or_default());
            }
            EventKind::TaskStarting => {
                println!("[starting] task={task:?} worker={:?}", e.worker);
            }
            EventKind::TaskStopped => {
                println!("[stopped] task={task:?} worker={:?}", e.worker);
            }
            EventKind::TaskFailed => {
                println!(
                    "[failed] task={task:?} worker={:?} err={:?}",
                    e.worker,
                    e.reason.as_deref().unwrap_or("unknown"),
                );
            }
            EventKind::SubscriberPanicked => {
                println!(
                    "[subscriber-panicked] subscriber={task} info={}",
                    e.reason.as_deref().unwrap_or("unknown"),
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
