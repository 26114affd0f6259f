use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, StdinLock};
use std::path::Path;

use crate::error::StreamError;

/// Readable data source: standard input or a buffered file.
#[derive(Debug)]
pub enum Input {
    /// Locked standard input.
    Stdin(StdinLock<'static>),
    /// Buffered file.
    File(BufReader<File>),
}

impl Input {
    /// Standard input, locked for the lifetime of the value.
    pub fn stdin() -> Self {
        Input::Stdin(io::stdin().lock())
    }

    /// Opens `path` for reading.
    ///
    /// # Errors
    /// [`StreamError::Open`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StreamError> {
        let path = path.as_ref();
        File::open(path)
            .map(|f| Input::File(BufReader::new(f)))
            .map_err(|source| StreamError::Open {
                path: path.to_path_buf(),
                source,
            })
    }

    #[inline]
    pub fn is_stdin(&self) -> bool {
        matches!(self, Input::Stdin(_))
    }
}

impl Read for Input {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Input::Stdin(r) => r.read(buf),
            Input::File(r) => r.read(buf),
        }
    }
}

impl BufRead for Input {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            Input::Stdin(r) => r.fill_buf(),
            Input::File(r) => r.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            Input::Stdin(r) => r.consume(amt),
            Input::File(r) => r.consume(amt),
        }
    }
}
