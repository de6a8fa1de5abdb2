//! Error-object emission
//!
//! Obtained with [`Logger::e`]. The error's message becomes the record
//! message and the error is attached twice, as `error` and as
//! `errorStacktrace`, ahead of any caller-supplied fields. A missing error
//! is still emitted: the message is `<nil>` and both fields are `null`.

use super::field::Field;
use super::logger::{exit, Logger};
use super::severity::Severity;
use std::error::Error;
use std::panic::Location;

const NIL_MESSAGE: &str = "<nil>";

pub struct ErrorLogger<'l> {
    logger: &'l Logger,
}

/// Hands back the logged error so emission can be chained into a return
///
/// ```
/// use rec_logger::prelude::*;
/// use std::sync::Arc;
///
/// fn load(logger: &Logger) -> std::io::Result<()> {
///     let err = std::io::Error::other("config missing");
///     let logged = logger.e().error(Some(&err), &[]).err().map(|e| e.to_string());
///     assert_eq!(logged.as_deref(), Some("config missing"));
///     Err(err)
/// }
///
/// let logger = Logger::with_config(Arc::new(MemoryAppender::new()), Config::default()).unwrap();
/// assert!(load(&logger).is_err());
/// ```
#[derive(Clone, Copy)]
pub struct ErrorReturner<'e> {
    err: Option<&'e dyn Error>,
}

impl<'e> ErrorReturner<'e> {
    pub fn err(&self) -> Option<&'e dyn Error> {
        self.err
    }
}

impl Logger {
    /// Error-object emission surface of this logger
    pub fn e(&self) -> ErrorLogger<'_> {
        ErrorLogger { logger: self }
    }
}

impl ErrorLogger<'_> {
    #[track_caller]
    fn emit(&self, severity: Severity, err: Option<&dyn Error>, fields: &[Field<'_>]) {
        if severity < self.logger.config().severity_threshold {
            return;
        }

        let message = match err {
            Some(err) => err.to_string(),
            None => NIL_MESSAGE.to_string(),
        };
        self.logger.log_at(
            Some(Location::caller()),
            severity,
            &message,
            &[Field::error(err), Field::error_stacktrace(err)],
            fields,
        );
    }

    #[track_caller]
    pub fn print<'e>(
        &self,
        severity: Severity,
        err: Option<&'e dyn Error>,
        fields: &[Field<'_>],
    ) -> ErrorReturner<'e> {
        self.emit(severity, err, fields);
        ErrorReturner { err }
    }

    /// Emit, then terminate the process with status 1
    #[track_caller]
    pub fn fatal(&self, severity: Severity, err: Option<&dyn Error>, fields: &[Field<'_>]) {
        self.emit(severity, err, fields);
        exit(1);
    }

    /// Emit, then panic with the error message
    #[track_caller]
    pub fn panic(&self, severity: Severity, err: Option<&dyn Error>, fields: &[Field<'_>]) -> ! {
        self.emit(severity, err, fields);
        match err {
            Some(err) => panic!("{}", err),
            None => panic!("{}", NIL_MESSAGE),
        }
    }

    #[track_caller]
    pub fn default<'e>(&self, err: Option<&'e dyn Error>, fields: &[Field<'_>]) -> ErrorReturner<'e> {
        self.print(Severity::DEFAULT, err, fields)
    }

    #[track_caller]
    pub fn debug<'e>(&self, err: Option<&'e dyn Error>, fields: &[Field<'_>]) -> ErrorReturner<'e> {
        self.print(Severity::DEBUG, err, fields)
    }

    #[track_caller]
    pub fn info<'e>(&self, err: Option<&'e dyn Error>, fields: &[Field<'_>]) -> ErrorReturner<'e> {
        self.print(Severity::INFO, err, fields)
    }

    #[track_caller]
    pub fn notice<'e>(&self, err: Option<&'e dyn Error>, fields: &[Field<'_>]) -> ErrorReturner<'e> {
        self.print(Severity::NOTICE, err, fields)
    }

    #[track_caller]
    pub fn warning<'e>(&self, err: Option<&'e dyn Error>, fields: &[Field<'_>]) -> ErrorReturner<'e> {
        self.print(Severity::WARNING, err, fields)
    }

    #[track_caller]
    pub fn error<'e>(&self, err: Option<&'e dyn Error>, fields: &[Field<'_>]) -> ErrorReturner<'e> {
        self.print(Severity::ERROR, err, fields)
    }

    #[track_caller]
    pub fn critical<'e>(&self, err: Option<&'e dyn Error>, fields: &[Field<'_>]) -> ErrorReturner<'e> {
        self.print(Severity::CRITICAL, err, fields)
    }

    #[track_caller]
    pub fn alert<'e>(&self, err: Option<&'e dyn Error>, fields: &[Field<'_>]) -> ErrorReturner<'e> {
        self.print(Severity::ALERT, err, fields)
    }

    #[track_caller]
    pub fn emergency<'e>(&self, err: Option<&'e dyn Error>, fields: &[Field<'_>]) -> ErrorReturner<'e> {
        self.print(Severity::EMERGENCY, err, fields)
    }
}
