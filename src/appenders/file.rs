//! File appender implementation

use crate::core::{Appender, Result};
use fs2::FileExt;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Appends records to a file
///
/// The file is opened in append mode and every record is written with one
/// `write_all` while an advisory exclusive lock is held, so several processes
/// can share the same log file.
pub struct FileAppender {
    file: Mutex<File>,
    path: PathBuf,
    name: String,
}

impl FileAppender {
    /// Open (or create) `path` for appending
    ///
    /// ```no_run
    /// use rec_logger::prelude::*;
    /// use std::sync::Arc;
    ///
    /// let appender = FileAppender::new("/var/log/app.jsonl").unwrap();
    /// let logger = Logger::builder().appender(Arc::new(appender)).build().unwrap();
    /// logger.info("started", &[]);
    /// ```
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let name = format!("file({})", path.display());

        Ok(Self {
            file: Mutex::new(file),
            path,
            name,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Appender for FileAppender {
    fn append(&self, record: &[u8]) -> io::Result<()> {
        let mut file = self.file.lock();
        file.lock_exclusive()?;
        let written = file.write_all(record);
        let unlocked = FileExt::unlock(&*file);
        written.and(unlocked)
    }

    fn flush(&self) -> io::Result<()> {
        self.file.lock().flush()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        let _ = self.file.get_mut().sync_data();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn test_appends_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.jsonl");

        let appender = FileAppender::new(&path).unwrap();
        appender.append(b"{\"n\":1}\n").unwrap();
        appender.append(b"{\"n\":2}\n").unwrap();
        appender.flush().unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\"n\":1}\n{\"n\":2}\n"
        );
        assert_eq!(appender.path(), path.as_path());
        assert!(appender.name().starts_with("file("));
    }

    #[test]
    fn test_reopen_keeps_existing_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.jsonl");

        FileAppender::new(&path).unwrap().append(b"first\n").unwrap();
        FileAppender::new(&path).unwrap().append(b"second\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_concurrent_records_do_not_interleave() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.jsonl");
        let appender = Arc::new(FileAppender::new(&path).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let appender = Arc::clone(&appender);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        let record = format!("{{\"thread\":{},\"i\":{}}}\n", t, i);
                        appender.append(record.as_bytes()).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 200);
        for line in contents.lines() {
            serde_json::from_str::<serde_json::Value>(line).unwrap();
        }
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(FileAppender::new(dir.path().join("missing").join("app.jsonl")).is_err());
    }
}
