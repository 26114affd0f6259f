//! # Environment: the stream pair a component works against.
//!
//! Either side may be absent. Accessing an absent side is an error, not a
//! panic. Both streams are released when the environment is dropped;
//! [`Environment::finish`] releases them too but reports flush failures.

use std::io::Write;

use crate::error::StreamError;

use super::{Input, Output};

/// Optional input and output streams owned for the duration of one task.
#[derive(Debug, Default)]
pub struct Environment {
    input: Option<Input>,
    output: Option<Output>,
}

impl Environment {
    /// Builds an environment; pass `None` to keep a side closed.
    pub fn new(input: Option<Input>, output: Option<Output>) -> Self {
        Self { input, output }
    }

    #[inline]
    pub fn has_input(&self) -> bool {
        self.input.is_some()
    }

    #[inline]
    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    /// The input stream.
    ///
    /// # Errors
    /// [`StreamError::NotOpen`] if no input was given.
    pub fn input(&mut self) -> Result<&mut Input, StreamError> {
        self.input
            .as_mut()
            .ok_or(StreamError::NotOpen { stream: "input" })
    }

    /// The output stream.
    ///
    /// # Errors
    /// [`StreamError::NotOpen`] if no output was given.
    pub fn output(&mut self) -> Result<&mut Output, StreamError> {
        self.output
            .as_mut()
            .ok_or(StreamError::NotOpen { stream: "output" })
    }

    /// Both streams at once, for components that read and write simultaneously.
    ///
    /// # Errors
    /// [`StreamError::NotOpen`] naming the first missing side.
    pub fn split(&mut self) -> Result<(&mut Input, &mut Output), StreamError> {
        match (self.input.as_mut(), self.output.as_mut()) {
            (Some(i), Some(o)) => Ok((i, o)),
            (None, _) => Err(StreamError::NotOpen { stream: "input" }),
            (_, None) => Err(StreamError::NotOpen { stream: "output" }),
        }
    }

    /// Flushes the output and releases both streams.
    ///
    /// # Errors
    /// [`StreamError::Flush`] if buffered output could not be written out.
    pub fn finish(mut self) -> Result<(), StreamError> {
        self.input.take();
        match self.output.take() {
            Some(mut out) => out.flush().map_err(|source| StreamError::Flush { source }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::{BufRead, Write};

    use super::*;

    #[test]
    fn test_missing_streams_are_errors() {
        let mut env = Environment::default();
        assert!(!env.has_input());
        assert!(!env.has_output());
        assert!(matches!(
            env.input(),
            Err(StreamError::NotOpen { stream: "input" })
        ));
        assert!(matches!(
            env.output(),
            Err(StreamError::NotOpen { stream: "output" })
        ));
        assert!(env.split().is_err());
        env.finish().unwrap();
    }

    #[test]
    fn test_copy_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("case.in");
        let dst = dir.path().join("case.out");
        fs::write(&src, "3 4\n").unwrap();

        let mut env = Environment::new(
            Some(Input::open(&src).unwrap()),
            Some(Output::create(&dst).unwrap()),
        );
        let (input, output) = env.split().unwrap();
        let mut line = String::new();
        input.read_line(&mut line).unwrap();
        let sum: i64 = line.split_whitespace().map(|t| t.parse::<i64>().unwrap()).sum();
        writeln!(output, "{sum}").unwrap();
        env.finish().unwrap();

        assert_eq!(fs::read_to_string(&dst).unwrap(), "7\n");
    }

    #[test]
    fn test_output_only_is_flushed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("only.out");
        {
            let mut env = Environment::new(None, Some(Output::create(&dst).unwrap()));
            assert!(env.has_output());
            write!(env.output().unwrap(), "42").unwrap();
        }
        assert_eq!(fs::read_to_string(&dst).unwrap(), "42");
    }
}
