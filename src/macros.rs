//! Formatting macros over [`Logger::f`](crate::Logger::f).
//!
//! Each macro expands to `format_args!` and hands the result to the matching
//! [`FormatLogger`](crate::FormatLogger) method, so the record's caller is
//! the macro's call site.
//!
//! # Examples
//!
//! ```
//! use rec_logger::prelude::*;
//! use rec_logger::infof;
//! use std::sync::Arc;
//!
//! let memory = MemoryAppender::new();
//! let logger = Logger::with_config(Arc::new(memory.clone()), Config::default()).unwrap();
//!
//! let port = 8080;
//! infof!(logger, "listening on port {}", port);
//! assert!(memory.lines()[0].contains("\"message\":\"listening on port 8080\""));
//! ```

/// Log a formatted message at an explicit severity.
///
/// # Examples
///
/// ```
/// # use rec_logger::prelude::*;
/// # let logger = Logger::with_config(std::sync::Arc::new(MemoryAppender::new()), Config::default()).unwrap();
/// use rec_logger::printf;
/// printf!(logger, Severity::NOTICE, "Simple message");
/// printf!(logger, Severity(42), "custom level {}", 42);
/// ```
#[macro_export]
macro_rules! printf {
    ($logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.f().printf($severity, format_args!($($arg)+))
    };
}

/// Log a formatted message at DEFAULT severity.
#[macro_export]
macro_rules! defaultf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.f().defaultf(format_args!($($arg)+))
    };
}

/// Log a formatted debug message.
///
/// # Examples
///
/// ```
/// # use rec_logger::prelude::*;
/// # let logger = Logger::with_config(std::sync::Arc::new(MemoryAppender::new()), Config::default()).unwrap();
/// use rec_logger::debugf;
/// debugf!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.f().debugf(format_args!($($arg)+))
    };
}

/// Log a formatted informational message.
#[macro_export]
macro_rules! infof {
    ($logger:expr, $($arg:tt)+) => {
        $logger.f().infof(format_args!($($arg)+))
    };
}

/// Log a formatted notice.
#[macro_export]
macro_rules! noticef {
    ($logger:expr, $($arg:tt)+) => {
        $logger.f().noticef(format_args!($($arg)+))
    };
}

/// Log a formatted warning.
///
/// # Examples
///
/// ```
/// # use rec_logger::prelude::*;
/// # let logger = Logger::with_config(std::sync::Arc::new(MemoryAppender::new()), Config::default()).unwrap();
/// use rec_logger::warningf;
/// let usage = 95;
/// warningf!(logger, "Disk usage at {}%", usage);
/// ```
#[macro_export]
macro_rules! warningf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.f().warningf(format_args!($($arg)+))
    };
}

/// Log a formatted error message.
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.f().errorf(format_args!($($arg)+))
    };
}

/// Log a formatted critical message.
#[macro_export]
macro_rules! criticalf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.f().criticalf(format_args!($($arg)+))
    };
}

/// Log a formatted alert.
#[macro_export]
macro_rules! alertf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.f().alertf(format_args!($($arg)+))
    };
}

/// Log a formatted emergency message.
#[macro_export]
macro_rules! emergencyf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.f().emergencyf(format_args!($($arg)+))
    };
}
