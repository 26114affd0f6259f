//! # Execute-exactly-once unit of work.
//!
//! A [`Runner`] wraps a [`Runnable`] body behind an atomic three-state
//! lifecycle. However many threads invoke [`Runner::call`] concurrently, the
//! body runs at most once:
//!
//! ```text
//! call():
//!   ├─ CAS Pending ─► Running   (loser: return false, no side effects)
//!   ├─ on_start()               (call_with only)
//!   ├─ body.run()               (panics caught, converted to TaskError::Panicked)
//!   ├─ store failure, if any
//!   └─ Running ─► Finished      (never transitions again)
//! ```
//!
//! A failing body does **not** unwind through the caller: the error is kept on
//! the runner ([`Runner::error`]) so the worker that called it stays alive.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};

use crate::error::TaskError;

/// Lifecycle state of a [`Runner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    /// Created, never called.
    Pending = 0,
    /// A caller won the transition and the body is executing.
    Running = 1,
    /// The body returned (successfully or not).
    Finished = 2,
}

impl Status {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => Status::Pending,
            1 => Status::Running,
            _ => Status::Finished,
        }
    }
}

/// # Work body executed by a [`Runner`].
///
/// Implementors only describe the work; the call-once guarantee, panic capture
/// and status tracking are provided by [`Runner`].
///
/// # Example
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use multigen::{Runnable, Runner, Status, TaskError};
///
/// struct Count(AtomicUsize);
///
/// impl Runnable for Count {
///     fn run(&self) -> Result<(), TaskError> {
///         self.0.fetch_add(1, Ordering::Relaxed);
///         Ok(())
///     }
/// }
///
/// let runner = Runner::new(Count(AtomicUsize::new(0)));
/// assert!(runner.call());
/// assert!(!runner.call());
/// assert_eq!(runner.status(), Status::Finished);
/// assert_eq!(runner.body().0.load(Ordering::Relaxed), 1);
/// ```
pub trait Runnable: Send + Sync + 'static {
    /// Executes the work. Called at most once per runner.
    fn run(&self) -> Result<(), TaskError>;

    /// Human-readable name (for events and summaries).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Call-once wrapper around a [`Runnable`] body.
///
/// `Runner<dyn Runnable>` (alias [`RunnerRef`] when shared) lets heterogeneous
/// bodies travel through one queue.
pub struct Runner<R: ?Sized = dyn Runnable> {
    status: AtomicU8,
    failure: OnceLock<TaskError>,
    body: R,
}

/// Shared, type-erased runner handle as queued by the pool.
pub type RunnerRef = Arc<Runner>;

impl<R: Runnable> Runner<R> {
    /// Wraps `body` in a pending runner.
    pub fn new(body: R) -> Self {
        Self {
            status: AtomicU8::new(Status::Pending as u8),
            failure: OnceLock::new(),
            body,
        }
    }

    /// Wraps `body` and returns it as a shared handle.
    pub fn arc(body: R) -> Arc<Self> {
        Arc::new(Self::new(body))
    }
}

impl<R: Runnable + ?Sized> Runner<R> {
    /// Runs the body if nobody has yet.
    ///
    /// Returns `true` iff this invocation executed the body. Every other
    /// caller (concurrent or later) returns `false` immediately.
    pub fn call(&self) -> bool {
        self.call_with(|| {})
    }

    /// Like [`call`](Self::call), but runs `on_start` right after this caller
    /// won the transition and before the body executes. Losers never run it.
    pub fn call_with(&self, on_start: impl FnOnce()) -> bool {
        if self
            .status
            .compare_exchange(
                Status::Pending as u8,
                Status::Running as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            return false;
        }
        on_start();

        let result = panic::catch_unwind(AssertUnwindSafe(|| self.body.run()))
            .unwrap_or_else(|payload| {
                Err(TaskError::Panicked {
                    info: panic_message(payload.as_ref()),
                })
            });
        if let Err(e) = result {
            let _ = self.failure.set(e);
        }

        self.status.store(Status::Finished as u8, Ordering::Release);
        true
    }

    /// Lock-free read of the current lifecycle state.
    #[inline]
    pub fn status(&self) -> Status {
        Status::from_u8(self.status.load(Ordering::Acquire))
    }

    /// Failure recorded by the body; `None` while pending/running or on success.
    pub fn error(&self) -> Option<&TaskError> {
        match self.status() {
            Status::Finished => self.failure.get(),
            _ => None,
        }
    }

    /// Returns the name reported by the body.
    pub fn name(&self) -> &str {
        self.body.name()
    }

    /// Borrows the body, e.g. to read results it recorded.
    pub fn body(&self) -> &R {
        &self.body
    }
}

impl<R: Runnable + ?Sized> fmt::Debug for Runner<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runner")
            .field("name", &self.name())
            .field("status", &self.status())
            .field("failed", &self.failure.get().is_some())
            .finish()
    }
}

/// Renders a panic payload (`&str` / `String`, otherwise a placeholder).
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    struct Counting {
        count: AtomicUsize,
    }

    impl Runnable for Counting {
        fn run(&self) -> Result<(), TaskError> {
            self.count.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    }

    #[test]
    fn test_call_once_under_contention() {
        let runner = Runner::new(Counting {
            count: AtomicUsize::new(0),
        });
        let winners = AtomicUsize::new(0);

        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    if runner.call() {
                        winners.fetch_add(1, Ordering::Relaxed);
                    }
                });
            }
        });

        assert_eq!(runner.body().count.load(Ordering::Relaxed), 1);
        assert_eq!(winners.load(Ordering::Relaxed), 1);
        assert_eq!(runner.status(), Status::Finished);
    }

    struct Gate {
        entered: mpsc::SyncSender<()>,
        release: parking_lot::Mutex<mpsc::Receiver<()>>,
    }

    impl Runnable for Gate {
        fn run(&self) -> Result<(), TaskError> {
            self.entered.send(()).map_err(|e| TaskError::fail(e.to_string()))?;
            self.release
                .lock()
                .recv()
                .map_err(|e| TaskError::fail(e.to_string()))
        }
    }

    #[test]
    fn test_status_moves_forward_only() {
        let (entered_tx, entered_rx) = mpsc::sync_channel(1);
        let (release_tx, release_rx) = mpsc::channel();
        let runner = Runner::arc(Gate {
            entered: entered_tx,
            release: parking_lot::Mutex::new(release_rx),
        });
        assert_eq!(runner.status(), Status::Pending);

        let r = Arc::clone(&runner);
        let t = thread::spawn(move || r.call());

        entered_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(runner.status(), Status::Running);
        assert!(!runner.call());
        assert!(runner.error().is_none());

        release_tx.send(()).unwrap();
        assert!(t.join().unwrap());
        assert_eq!(runner.status(), Status::Finished);
        assert!(!runner.call());
        assert_eq!(runner.status(), Status::Finished);
    }

    struct Boom;

    impl Runnable for Boom {
        fn run(&self) -> Result<(), TaskError> {
            panic!("boom");
        }

        fn name(&self) -> &str {
            "boom"
        }
    }

    #[test]
    fn test_start_hook_runs_only_for_winner() {
        let runner = Runner::new(Counting {
            count: AtomicUsize::new(0),
        });
        let hooks = AtomicUsize::new(0);

        assert!(runner.call_with(|| {
            assert_eq!(runner.status(), Status::Running);
            assert_eq!(runner.body().count.load(Ordering::Relaxed), 0);
            hooks.fetch_add(1, Ordering::Relaxed);
        }));
        assert!(!runner.call_with(|| {
            hooks.fetch_add(1, Ordering::Relaxed);
        }));
        assert_eq!(hooks.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_panic_is_captured_as_failure() {
        let runner = Runner::new(Boom);
        assert!(runner.call());
        assert_eq!(runner.status(), Status::Finished);
        match runner.error() {
            Some(TaskError::Panicked { info }) => assert_eq!(info, "boom"),
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(runner.name(), "boom");
    }

    #[test]
    fn test_erased_handle_keeps_typed_view() {
        let typed = Runner::arc(Counting {
            count: AtomicUsize::new(0),
        });
        let erased: RunnerRef = typed.clone();
        assert!(erased.call());
        assert_eq!(typed.body().count.load(Ordering::Relaxed), 1);
        assert_eq!(typed.status(), Status::Finished);
    }
}
