//! Formatted (printf-style) emission
//!
//! Obtained with [`Logger::f`]; every method takes `fmt::Arguments`, usually
//! through `format_args!` or the crate's `*f!` macros.

use super::logger::{exit, Logger};
use super::severity::Severity;
use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

pub struct FormatLogger<'l> {
    logger: &'l Logger,
}

impl Logger {
    /// Formatted emission surface of this logger
    pub fn f(&self) -> FormatLogger<'_> {
        FormatLogger { logger: self }
    }
}

fn render(args: fmt::Arguments<'_>) -> Cow<'static, str> {
    match args.as_str() {
        Some(message) => Cow::Borrowed(message),
        None => Cow::Owned(fmt::format(args)),
    }
}

impl FormatLogger<'_> {
    #[track_caller]
    fn emit(&self, severity: Severity, args: fmt::Arguments<'_>) {
        if severity < self.logger.config().severity_threshold {
            return;
        }
        self.logger
            .log_at(Some(Location::caller()), severity, &render(args), &[], &[]);
    }

    #[track_caller]
    pub fn printf(&self, severity: Severity, args: fmt::Arguments<'_>) {
        self.emit(severity, args);
    }

    /// Emit, then terminate the process with status 1
    #[track_caller]
    pub fn fatalf(&self, severity: Severity, args: fmt::Arguments<'_>) {
        self.emit(severity, args);
        exit(1);
    }

    /// Emit, then panic with the formatted message
    #[track_caller]
    pub fn panicf(&self, severity: Severity, args: fmt::Arguments<'_>) -> ! {
        let message = render(args);
        self.logger
            .log_at(Some(Location::caller()), severity, &message, &[], &[]);
        panic!("{}", message);
    }

    #[track_caller]
    pub fn defaultf(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::DEFAULT, args);
    }

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::DEBUG, args);
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::INFO, args);
    }

    #[track_caller]
    pub fn noticef(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::NOTICE, args);
    }

    #[track_caller]
    pub fn warningf(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::WARNING, args);
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::ERROR, args);
    }

    #[track_caller]
    pub fn criticalf(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::CRITICAL, args);
    }

    #[track_caller]
    pub fn alertf(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::ALERT, args);
    }

    #[track_caller]
    pub fn emergencyf(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::EMERGENCY, args);
    }
}
