//! Appender implementations

pub mod console;
#[cfg(feature = "file")]
pub mod file;
pub mod memory;
pub mod writer;

pub use console::ConsoleAppender;
#[cfg(feature = "file")]
pub use file::FileAppender;
pub use memory::MemoryAppender;
pub use writer::WriterAppender;

pub use crate::core::Appender;
