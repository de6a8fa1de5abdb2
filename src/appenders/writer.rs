//! Appender over any `io::Write`

use crate::core::Appender;
use parking_lot::Mutex;
use std::io::{self, Write};

/// Adapts an arbitrary writer, such as a socket or a `BufWriter`
pub struct WriterAppender<W: Write + Send> {
    writer: Mutex<W>,
    name: String,
}

impl<W: Write + Send> WriterAppender<W> {
    pub fn new(writer: W) -> Self {
        Self::with_name(writer, "writer")
    }

    /// Name used in write-failure diagnostics
    pub fn with_name(writer: W, name: impl Into<String>) -> Self {
        Self {
            writer: Mutex::new(writer),
            name: name.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> Appender for WriterAppender<W> {
    fn append(&self, record: &[u8]) -> io::Result<()> {
        self.writer.lock().write_all(record)
    }

    fn flush(&self) -> io::Result<()> {
        self.writer.lock().flush()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
