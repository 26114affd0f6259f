use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::Path;

use crate::error::StreamError;

/// Writable data sink: standard output or a buffered file.
///
/// File output is buffered; call [`Write::flush`] (or release it through
/// [`Environment::finish`](crate::Environment::finish)) to observe write errors.
#[derive(Debug)]
pub enum Output {
    /// Standard output.
    Stdout(Stdout),
    /// Buffered file, truncated on creation.
    File(BufWriter<File>),
}

impl Output {
    pub fn stdout() -> Self {
        Output::Stdout(io::stdout())
    }

    /// Creates (or truncates) `path` for writing.
    ///
    /// # Errors
    /// [`StreamError::Open`] if the file cannot be created.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, StreamError> {
        let path = path.as_ref();
        File::create(path)
            .map(|f| Output::File(BufWriter::new(f)))
            .map_err(|source| StreamError::Open {
                path: path.to_path_buf(),
                source,
            })
    }

    #[inline]
    pub fn is_stdout(&self) -> bool {
        matches!(self, Output::Stdout(_))
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(w) => w.write(buf),
            Output::File(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(w) => w.flush(),
            Output::File(w) => w.flush(),
        }
    }
}
