//! Bounded parallelism: OS worker threads pulling runners off one shared channel.
//!
//! ## Contents
//! - [`ThreadPool`] lifecycle (`start`/`stop`), submission (`execute`/`submit`)
//! - `Worker` (private) the receive-and-call loop of one thread

mod thread_pool;
mod worker;

pub use thread_pool::ThreadPool;
