//! Console appender implementation

use crate::core::Appender;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

/// Writes records to the process's standard output or standard error
///
/// The stream lock is held for the whole record so concurrent loggers never
/// interleave partial lines.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleAppender {
    stream: Stream,
}

impl ConsoleAppender {
    pub fn stderr() -> Self {
        Self {
            stream: Stream::Stderr,
        }
    }

    pub fn stdout() -> Self {
        Self {
            stream: Stream::Stdout,
        }
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::stderr()
    }
}

impl Appender for ConsoleAppender {
    fn append(&self, record: &[u8]) -> io::Result<()> {
        match self.stream {
            Stream::Stdout => io::stdout().lock().write_all(record),
            Stream::Stderr => io::stderr().lock().write_all(record),
        }
    }

    fn flush(&self) -> io::Result<()> {
        match self.stream {
            Stream::Stdout => io::stdout().flush(),
            Stream::Stderr => io::stderr().flush(),
        }
    }

    fn name(&self) -> &str {
        match self.stream {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_stderr() {
        assert_eq!(ConsoleAppender::default().name(), "stderr");
        assert_eq!(ConsoleAppender::stdout().name(), "stdout");
    }

    #[test]
    fn test_append_and_flush() {
        let appender = ConsoleAppender::stdout();
        assert!(appender.append(b"{\"message\":\"console\"}\n").is_ok());
        assert!(appender.flush().is_ok());
    }
}
