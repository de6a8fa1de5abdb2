//! In-memory appender

use crate::core::Appender;
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;

/// Collects records in a shared buffer
///
/// Clones share the same buffer, so a clone kept by the caller sees every
/// record written through the logger that owns the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryAppender {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.buffer.lock().clone()
    }

    /// Written records, one entry per line, separators removed
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Appender for MemoryAppender {
    fn append(&self, record: &[u8]) -> io::Result<()> {
        self.buffer.lock().extend_from_slice(record);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let memory = MemoryAppender::new();
        let writer = memory.clone();
        writer.append(b"{\"a\":1}\n").unwrap();
        writer.append(b"{\"b\":2}\n").unwrap();

        assert_eq!(memory.lines(), ["{\"a\":1}", "{\"b\":2}"]);
        assert_eq!(memory.bytes(), b"{\"a\":1}\n{\"b\":2}\n");

        memory.clear();
        assert!(writer.contents().is_empty());
    }
}
