//! # Task group: ordered factories sharing one context.
//!
//! A [`TaskGroup`] owns one [`Context`] and an ordered list of task factories.
//! Ids are assigned at insertion (`0, 1, 2, ...`). [`TaskGroup::next`] hands
//! entries out one at a time under a lock, so any number of threads can drain
//! the same group:
//!
//! ```text
//! entries: [ (0, f0) (1, f1) (2, f2) ]
//!                      ▲
//!                    cursor        next() ─► Some((1, f1)), cursor += 1
//! ```
//!
//! ## Rules
//! - Every entry is handed out exactly once, in ascending id order.
//! - Once the cursor reaches the end, every call returns `None`.
//! - `add` and `next` are O(1) critical sections and never block on work.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::context::Context;
use crate::tasks::task::{BoxTask, Task};

/// Shared factory producing a fresh task per call.
pub type TaskFactory = Arc<dyn Fn() -> BoxTask + Send + Sync>;

/// One `(id, factory)` pair handed out by [`TaskGroup::next`].
#[derive(Clone)]
pub struct Entry {
    /// 0-based insertion sequence number.
    pub id: usize,
    /// Builds the task for this entry.
    pub factory: TaskFactory,
}

impl Entry {
    /// Invokes the factory.
    pub fn build(&self) -> BoxTask {
        (self.factory)()
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry").field("id", &self.id).finish()
    }
}

struct Queue {
    entries: Vec<Entry>,
    cursor: usize,
}

/// Ordered, concurrency-safe collection of task factories sharing one [`Context`].
///
/// # Example
/// ```
/// use multigen::{Context, DataConfig, TaskFn, TaskGroup};
///
/// let group = TaskGroup::new(Context::normal(1, DataConfig::new()));
/// let id = group.add(|| TaskFn::boxed("noop", |_: &Context| Ok(())));
/// assert_eq!(id, 0);
///
/// let entry = group.next().unwrap();
/// assert_eq!(entry.id, 0);
/// assert!(group.next().is_none());
/// ```
pub struct TaskGroup {
    context: Arc<Context>,
    queue: Mutex<Queue>,
}

impl TaskGroup {
    pub fn new(context: Context) -> Self {
        Self::with_shared(Arc::new(context))
    }

    /// Creates a group over an already shared context.
    pub fn with_shared(context: Arc<Context>) -> Self {
        Self {
            context,
            queue: Mutex::new(Queue {
                entries: Vec::new(),
                cursor: 0,
            }),
        }
    }

    /// Appends a factory and returns its id (its 0-based insertion index).
    pub fn add<F>(&self, factory: F) -> usize
    where
        F: Fn() -> BoxTask + Send + Sync + 'static,
    {
        let mut q = self.queue.lock();
        let id = q.entries.len();
        q.entries.push(Entry {
            id,
            factory: Arc::new(factory),
        });
        id
    }

    /// Appends a factory building `T::default()`.
    pub fn add_default<T>(&self) -> usize
    where
        T: Task + Default,
    {
        self.add(|| Box::new(T::default()))
    }

    /// Hands out the next entry, or `None` once all entries were taken.
    pub fn next(&self) -> Option<Entry> {
        let mut q = self.queue.lock();
        let entry = q.entries.get(q.cursor).cloned()?;
        q.cursor += 1;
        Some(entry)
    }

    /// Context shared by every task this group produces.
    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }

    /// Number of entries ever added.
    pub fn len(&self) -> usize {
        self.queue.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries not yet handed out.
    pub fn remaining(&self) -> usize {
        let q = self.queue.lock();
        q.entries.len() - q.cursor
    }
}

impl fmt::Debug for TaskGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let q = self.queue.lock();
        f.debug_struct("TaskGroup")
            .field("case", &self.context.id())
            .field("len", &q.entries.len())
            .field("cursor", &q.cursor)
            .finish()
    }
}
