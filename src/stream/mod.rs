//! # Stream resources used by components.
//!
//! - [`Input`]: standard input or a buffered file; implements `Read` and `BufRead`
//! - [`Output`]: standard output or a buffered file; implements `Write`
//! - [`Environment`]: owns an optional input and an optional output for one task
//!
//! Opening a file that cannot be opened fails at acquisition time with
//! [`StreamError::Open`](crate::StreamError::Open).
//!
//! ## Example
//! ```rust
//! use std::io::Write;
//! use multigen::{Environment, Output};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("sample.in");
//!
//! let mut env = Environment::new(None, Some(Output::create(&path).unwrap()));
//! writeln!(env.output().unwrap(), "1 2").unwrap();
//! env.finish().unwrap();
//!
//! assert_eq!(std::fs::read_to_string(&path).unwrap(), "1 2\n");
//! ```

mod environment;
mod input;
mod output;

pub use environment::Environment;
pub use input::Input;
pub use output::Output;

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Read;

    use super::*;
    use crate::error::StreamError;

    #[test]
    fn test_open_missing_file_fails_at_acquisition() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope").join("x.in");

        match Input::open(&missing) {
            Err(StreamError::Open { path, .. }) => assert_eq!(path, missing),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            Output::create(&missing),
            Err(StreamError::Open { .. })
        ));
    }

    #[test]
    fn test_input_reads_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tmp.txt");
        fs::write(&path, "test\n").unwrap();

        let mut input = Input::open(&path).unwrap();
        assert!(!input.is_stdin());
        let mut text = String::new();
        input.read_to_string(&mut text).unwrap();
        assert_eq!(text.trim(), "test");

        assert!(Output::stdout().is_stdout());
    }
}
