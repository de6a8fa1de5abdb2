//! Appender trait for record destinations

use std::io;

/// Destination stream for rendered records
///
/// Each call to `append` receives one complete record, line separator
/// included, and should write it in a single operation. Appenders are shared
/// between a logger and every logger derived from it, so they synchronize
/// internally.
pub trait Appender: Send + Sync {
    fn append(&self, record: &[u8]) -> io::Result<()>;

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}
