//! Core logger types and traits

pub mod append;
pub mod appender;
pub mod caller;
pub mod config;
pub mod context;
pub mod error;
pub mod error_logger;
pub mod field;
pub mod format_logger;
pub mod logger;
pub mod option;
pub mod pool;
pub mod record;
pub mod severity;
pub mod timestamp;

pub use append::FloatWidth;
pub use appender::Appender;
pub use caller::Caller;
pub use config::{os_hostname, Config};
pub use context::{bind_logger, context_logger, try_context_logger, ContextGuard};
pub use error::{LoggerError, Result};
pub use error_logger::{ErrorLogger, ErrorReturner};
pub use field::{
    append_field_value, append_field_value_with, append_json_field, Field, FieldValue, IntWidth,
    ObjectValue, Stacktrace, TimeValue,
};
pub use format_logger::FormatLogger;
pub use logger::{
    default_logger, replace_default_logger, replace_exit_fn, Logger, LoggerBuilder,
};
pub use option::{apply_options, ConfigOption};
pub use pool::{buffer_pool, BufferPool, PooledBuffer};
pub use severity::{Severity, SeverityRegistry};
pub use timestamp::{default_time_format, set_default_time_format, TimestampFormat};

/// Serializes unit tests that swap process-wide state
#[cfg(test)]
pub(crate) static TEST_LOCK: parking_lot::Mutex<()> = parking_lot::Mutex::new(());
