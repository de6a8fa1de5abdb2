//! # rec_logger
//!
//! A structured logger that writes every record as a single-line JSON
//! object.
//!
//! ## Features
//!
//! - **Typed fields**: integers, floats (NaN and infinities included), complex
//!   numbers, times, durations, strings, errors and serde objects are encoded
//!   straight into a pooled byte buffer
//! - **Always valid JSON**: bad fields degrade to `null` or a diagnostic string
//! - **Immutable loggers**: derived loggers copy, never mutate, their source
//! - **Severities**: nine built-in levels plus per-logger custom levels
//!
//! ## Example
//!
//! ```
//! use rec_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let memory = MemoryAppender::new();
//! let logger = Logger::new(
//!     Arc::new(memory.clone()),
//!     &[ConfigOption::UseTimestampField(false), ConfigOption::UseCallerField(false)],
//! )
//! .unwrap();
//!
//! logger.info("server started", &[Field::u16("port", 8080)]);
//! assert_eq!(
//!     memory.lines(),
//!     [r#"{"severity":"INFO","message":"server started","port":8080}"#]
//! );
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, MemoryAppender, WriterAppender};
    #[cfg(feature = "file")]
    pub use crate::appenders::FileAppender;
    pub use crate::core::{
        default_logger, replace_default_logger, Appender, Config, ConfigOption, ErrorLogger,
        Field, FieldValue, FormatLogger, Logger, LoggerBuilder, LoggerError, Result, Severity,
        TimestampFormat,
    };
}

pub use appenders::{ConsoleAppender, MemoryAppender, WriterAppender};
#[cfg(feature = "file")]
pub use appenders::FileAppender;
pub use core::{
    default_logger, replace_default_logger, Appender, Config, ConfigOption, ErrorLogger, Field,
    FieldValue, FormatLogger, Logger, LoggerBuilder, LoggerError, Result, Severity,
    TimestampFormat,
};
