//! # Run configuration.
//!
//! [`Config`] holds the settings a [`Template`](crate::Template) run needs:
//! how many worker threads to use and where data files are written.
//!
//! # Example
//! ```
//! use multigen::Config;
//!
//! let cfg = Config::default().with_workers(4).with_output_dir("data");
//! assert_eq!(cfg.worker_count(), 4);
//! assert_eq!(cfg.output_dir, std::path::Path::new("data"));
//! ```

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::thread;

/// Worker count used when the available parallelism cannot be queried.
const FALLBACK_WORKERS: usize = 1;

/// Settings for one template run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Number of worker threads (0 = one per available CPU).
    pub workers: usize,
    /// Directory receiving `.in` / `.out` files. Must exist.
    pub output_dir: PathBuf,
}

impl Default for Config {
    /// Provides a default configuration:
    /// - `workers = 0` (available parallelism)
    /// - `output_dir = "."`
    fn default() -> Self {
        Self {
            workers: 0,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Sets the worker count (0 = available parallelism).
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Resolved worker count; never 0.
    #[inline]
    pub fn worker_count(&self) -> usize {
        match self.workers {
            0 => thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(FALLBACK_WORKERS),
            n => n,
        }
    }
}
