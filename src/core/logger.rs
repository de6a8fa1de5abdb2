//! Main logger implementation
//!
//! A [`Logger`] owns its configuration, its severity registry, the
//! pre-rendered context fields and a shared destination. Loggers are never
//! reconfigured in place: every derivation (`copy`, `with`, `renew`,
//! `renew_writer`) returns a new logger and leaves the source untouched.

use super::{
    appender::Appender,
    caller::Caller,
    config::Config,
    error::{LoggerError, Result},
    field::Field,
    option::{apply_options, ConfigOption},
    pool::buffer_pool,
    record::{append_context_fields, assemble, Record},
    severity::{Severity, SeverityRegistry},
};
use crate::appenders::ConsoleAppender;
use chrono::{DateTime, FixedOffset, Local};
use parking_lot::RwLock;
use std::cell::Cell;
use std::fmt;
use std::io;
use std::panic::Location;
use std::sync::{Arc, OnceLock};

pub struct Logger {
    config: Config,
    severities: RwLock<SeverityRegistry>,
    /// Comma-terminated `"key":value,` fragments
    context_fields: Vec<u8>,
    appender: Arc<dyn Appender>,
}

impl Logger {
    /// Create a logger from [`Config::new`] with `options` applied in order
    pub fn new(appender: Arc<dyn Appender>, options: &[ConfigOption]) -> Result<Self> {
        let mut config = Config::new();
        apply_options(&mut config, options)?;
        Self::with_config(appender, config)
    }

    /// Create a logger from an explicit configuration
    pub fn with_config(appender: Arc<dyn Appender>, config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(
            config,
            SeverityRegistry::new(),
            Vec::new(),
            appender,
        ))
    }

    fn from_parts(
        config: Config,
        severities: SeverityRegistry,
        context_fields: Vec<u8>,
        appender: Arc<dyn Appender>,
    ) -> Self {
        Self {
            config,
            severities: RwLock::new(severities),
            context_fields,
            appender,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn context_fields(&self) -> &[u8] {
        &self.context_fields
    }

    pub fn appender(&self) -> &Arc<dyn Appender> {
        &self.appender
    }

    /// Snapshot of the severity registry
    pub fn severities(&self) -> SeverityRegistry {
        self.severities.read().clone()
    }

    /// Independent copy sharing only the destination
    #[must_use]
    pub fn copy(&self) -> Logger {
        Self::from_parts(
            self.config.clone(),
            self.severities(),
            self.context_fields.clone(),
            Arc::clone(&self.appender),
        )
    }

    /// Copy with `fields` added to every future record
    #[must_use]
    pub fn with(&self, fields: &[Field<'_>]) -> Logger {
        let mut copied = self.copy();
        append_context_fields(&mut copied.context_fields, fields);
        copied
    }

    /// Copy with `options` applied on top of this logger's configuration
    pub fn renew(&self, options: &[ConfigOption]) -> Result<Logger> {
        let mut copied = self.copy();
        apply_options(&mut copied.config, options)?;
        copied.config.validate()?;
        Ok(copied)
    }

    /// Copy writing to a different destination
    #[must_use]
    pub fn renew_writer(&self, appender: Arc<dyn Appender>) -> Logger {
        let mut copied = self.copy();
        copied.appender = appender;
        copied
    }

    /// Copy that attributes records `skip` frames further up the stack
    ///
    /// The skip adds to any skip already configured.
    #[must_use]
    pub fn add_caller_skip(&self, skip: usize) -> Logger {
        let mut copied = self.copy();
        copied.config.caller_skip = copied.config.caller_skip.saturating_add(skip);
        copied
    }

    /// Register display names for a custom level on this logger
    pub fn add_custom_severity(
        &self,
        severity: Severity,
        lowercase: &str,
        uppercase: &str,
    ) -> Result<()> {
        self.severities
            .write()
            .register(severity, lowercase, uppercase)
    }

    pub fn flush(&self) -> io::Result<()> {
        self.appender.flush()
    }

    /// Emit a record at `severity`
    #[track_caller]
    pub fn print(&self, severity: Severity, message: &str, fields: &[Field<'_>]) {
        self.log_at(Some(Location::caller()), severity, message, &[], fields);
    }

    /// Emit a record, then terminate the process with status 1
    #[track_caller]
    pub fn fatal(&self, severity: Severity, message: &str, fields: &[Field<'_>]) {
        self.log_at(Some(Location::caller()), severity, message, &[], fields);
        exit(1);
    }

    /// Emit a record, then panic with the message
    #[track_caller]
    pub fn panic(&self, severity: Severity, message: &str, fields: &[Field<'_>]) -> ! {
        self.log_at(Some(Location::caller()), severity, message, &[], fields);
        panic!("{}", message);
    }

    #[track_caller]
    pub fn default(&self, message: &str, fields: &[Field<'_>]) {
        self.log_at(Some(Location::caller()), Severity::DEFAULT, message, &[], fields);
    }

    #[track_caller]
    pub fn debug(&self, message: &str, fields: &[Field<'_>]) {
        self.log_at(Some(Location::caller()), Severity::DEBUG, message, &[], fields);
    }

    #[track_caller]
    pub fn info(&self, message: &str, fields: &[Field<'_>]) {
        self.log_at(Some(Location::caller()), Severity::INFO, message, &[], fields);
    }

    #[track_caller]
    pub fn notice(&self, message: &str, fields: &[Field<'_>]) {
        self.log_at(Some(Location::caller()), Severity::NOTICE, message, &[], fields);
    }

    #[track_caller]
    pub fn warning(&self, message: &str, fields: &[Field<'_>]) {
        self.log_at(Some(Location::caller()), Severity::WARNING, message, &[], fields);
    }

    #[track_caller]
    pub fn error(&self, message: &str, fields: &[Field<'_>]) {
        self.log_at(Some(Location::caller()), Severity::ERROR, message, &[], fields);
    }

    #[track_caller]
    pub fn critical(&self, message: &str, fields: &[Field<'_>]) {
        self.log_at(Some(Location::caller()), Severity::CRITICAL, message, &[], fields);
    }

    #[track_caller]
    pub fn alert(&self, message: &str, fields: &[Field<'_>]) {
        self.log_at(Some(Location::caller()), Severity::ALERT, message, &[], fields);
    }

    #[track_caller]
    pub fn emergency(&self, message: &str, fields: &[Field<'_>]) {
        self.log_at(Some(Location::caller()), Severity::EMERGENCY, message, &[], fields);
    }

    /// Emit a record attributed to `caller`
    ///
    /// `leading` fields are written before `fields`.
    pub(crate) fn log_at(
        &self,
        caller: Option<&'static Location<'static>>,
        severity: Severity,
        message: &str,
        leading: &[Field<'_>],
        fields: &[Field<'_>],
    ) {
        if severity < self.config.severity_threshold {
            return;
        }
        let now = Local::now().fixed_offset();
        self.write(&now, caller, severity, message, leading, fields);
    }

    fn write(
        &self,
        now: &DateTime<FixedOffset>,
        caller: Option<&'static Location<'static>>,
        severity: Severity,
        message: &str,
        leading: &[Field<'_>],
        fields: &[Field<'_>],
    ) {
        let custom_name;
        let uppercase = self.config.use_uppercase_severity;
        let builtin = if uppercase {
            severity.builtin_uppercase()
        } else {
            severity.builtin_lowercase()
        };
        let severity_name = match builtin {
            Some(name) => name,
            None => {
                custom_name = self.severities.read().name(severity, uppercase).into_owned();
                custom_name.as_str()
            }
        };

        let resolved_caller = match caller {
            Some(location) if self.config.use_caller_field => {
                Caller::resolve(location, self.config.caller_skip)
            }
            _ => None,
        };

        let record = Record {
            time: now,
            severity_name,
            caller: resolved_caller.as_ref(),
            message,
        };

        let mut buffer = buffer_pool().get();
        assemble(
            &mut buffer,
            &self.config,
            &record,
            &self.context_fields,
            leading,
            fields,
        );

        if let Err(e) = self.appender.append(&buffer) {
            drop(buffer);
            report_write_failure(self.appender.name(), e, caller);
        }
    }
}

impl Clone for Logger {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("context_fields", &String::from_utf8_lossy(&self.context_fields))
            .field("appender", &self.appender.name())
            .finish()
    }
}

thread_local! {
    static REPORTING_WRITE_FAILURE: Cell<bool> = const { Cell::new(false) };
}

struct ReportingGuard;

impl Drop for ReportingGuard {
    fn drop(&mut self) {
        REPORTING_WRITE_FAILURE.with(|flag| flag.set(false));
    }
}

/// Report a failed write through the default logger
///
/// A failure while already reporting on this thread goes to stderr instead.
fn report_write_failure(
    writer: &str,
    source: io::Error,
    caller: Option<&'static Location<'static>>,
) {
    let err = LoggerError::write_failed(writer, source);

    if REPORTING_WRITE_FAILURE.with(|flag| flag.replace(true)) {
        eprintln!("[LOGGER ERROR] {}", err);
        return;
    }
    let _guard = ReportingGuard;

    let message = err.to_string();
    default_logger().log_at(
        caller,
        Severity::ERROR,
        &message,
        &[],
        &[Field::error(std::error::Error::source(&err))],
    );
}

fn default_slot() -> &'static RwLock<Arc<Logger>> {
    static DEFAULT_LOGGER: OnceLock<RwLock<Arc<Logger>>> = OnceLock::new();
    DEFAULT_LOGGER.get_or_init(|| {
        RwLock::new(Arc::new(Logger::from_parts(
            Config::new(),
            SeverityRegistry::new(),
            Vec::new(),
            Arc::new(ConsoleAppender::stderr()),
        )))
    })
}

/// Process-wide default logger (stderr, [`Config::new`])
pub fn default_logger() -> Arc<Logger> {
    Arc::clone(&default_slot().read())
}

/// Replace the default logger, returning a callback that restores the
/// previous one
///
/// Replacements nest like a stack; restore in reverse order.
pub fn replace_default_logger(logger: Arc<Logger>) -> impl FnOnce() {
    let previous = std::mem::replace(&mut *default_slot().write(), logger);
    move || {
        *default_slot().write() = previous;
    }
}

fn exit_process(code: i32) {
    std::process::exit(code);
}

static EXIT_FN: RwLock<fn(i32)> = RwLock::new(exit_process);

pub(crate) fn exit(code: i32) {
    let exit_fn = *EXIT_FN.read();
    exit_fn(code);
}

/// Replace the function `fatal` emission calls after writing, returning a
/// callback that restores the previous one
pub fn replace_exit_fn(exit_fn: fn(i32)) -> impl FnOnce() {
    let previous = std::mem::replace(&mut *EXIT_FN.write(), exit_fn);
    move || {
        *EXIT_FN.write() = previous;
    }
}

/// Builder for [`Logger`]
///
/// # Example
/// ```
/// use rec_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .appender(Arc::new(MemoryAppender::new()))
///     .option(ConfigOption::SeverityThreshold(Severity::INFO))
///     .option(ConfigOption::UseTimestampField(false))
///     .build()
///     .unwrap();
/// assert_eq!(logger.config().severity_threshold, Severity::INFO);
/// ```
pub struct LoggerBuilder {
    config: Option<Config>,
    options: Vec<ConfigOption>,
    appender: Option<Arc<dyn Appender>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            options: Vec::new(),
            appender: None,
        }
    }

    /// Start from `config` instead of [`Config::new`]
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Queue an option; options are applied in order
    #[must_use = "builder methods return a new value"]
    pub fn option(mut self, option: ConfigOption) -> Self {
        self.options.push(option);
        self
    }

    /// Set the destination (stderr when not set)
    #[must_use = "builder methods return a new value"]
    pub fn appender(mut self, appender: Arc<dyn Appender>) -> Self {
        self.appender = Some(appender);
        self
    }

    pub fn build(self) -> Result<Logger> {
        let mut config = self.config.unwrap_or_else(Config::new);
        apply_options(&mut config, &self.options)?;

        let appender = self
            .appender
            .unwrap_or_else(|| Arc::new(ConsoleAppender::stderr()));
        Logger::with_config(appender, config)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::MemoryAppender;
    use crate::core::TEST_LOCK;

    struct FailingAppender;

    impl Appender for FailingAppender {
        fn append(&self, _record: &[u8]) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn quiet_config() -> Config {
        Config::default()
            .with_timestamp_field(false)
            .with_caller_field(false)
    }

    fn memory_logger(config: Config) -> (Logger, MemoryAppender) {
        let memory = MemoryAppender::new();
        let logger = Logger::with_config(Arc::new(memory.clone()), config).unwrap();
        (logger, memory)
    }

    #[test]
    fn test_with_config_validates() {
        let err = Logger::with_config(
            Arc::new(MemoryAppender::new()),
            Config::default().with_caller_field_key(""),
        )
        .unwrap_err();
        assert!(matches!(err, LoggerError::EmptyKey { field: "caller_field_key" }));
    }

    #[test]
    fn test_new_applies_options() {
        let logger = Logger::new(
            Arc::new(MemoryAppender::new()),
            &[
                ConfigOption::UseCallerField(false),
                ConfigOption::MessageFieldKey("msg".to_string()),
            ],
        )
        .unwrap();
        assert!(!logger.config().use_caller_field);
        assert_eq!(logger.config().message_field_key, "msg");

        let err = Logger::new(
            Arc::new(MemoryAppender::new()),
            &[ConfigOption::SeverityFieldKey(String::new())],
        )
        .unwrap_err();
        assert!(matches!(err, LoggerError::EmptyKey { .. }));
    }

    #[test]
    fn test_severity_methods() {
        let (logger, memory) = memory_logger(quiet_config());
        logger.default("a", &[]);
        logger.debug("b", &[]);
        logger.info("c", &[]);
        logger.notice("d", &[]);
        logger.warning("e", &[]);
        logger.error("f", &[]);
        logger.critical("g", &[]);
        logger.alert("h", &[]);
        logger.emergency("i", &[]);

        let severities: Vec<String> = memory
            .lines()
            .iter()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["severity"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(
            severities,
            [
                "DEFAULT",
                "DEBUG",
                "INFO",
                "NOTICE",
                "WARNING",
                "ERROR",
                "CRITICAL",
                "ALERT",
                "EMERGENCY"
            ]
        );
    }

    #[test]
    fn test_threshold_drops_records() {
        let (logger, memory) =
            memory_logger(quiet_config().with_severity_threshold(Severity::WARNING));
        logger.info("dropped", &[]);
        logger.print(Severity(399), "dropped", &[]);
        assert!(memory.contents().is_empty());

        logger.warning("kept", &[]);
        assert_eq!(memory.lines(), ["{\"severity\":\"WARNING\",\"message\":\"kept\"}"]);
    }

    #[test]
    fn test_lowercase_and_custom_severity() {
        let (logger, memory) = memory_logger(quiet_config().with_uppercase_severity(false));
        logger
            .add_custom_severity(Severity(250), "info2", "INFO2")
            .unwrap();

        logger.info("a", &[]);
        logger.print(Severity(250), "b", &[]);
        logger.print(Severity(251), "c", &[]);

        assert_eq!(
            memory.lines(),
            [
                "{\"severity\":\"info\",\"message\":\"a\"}",
                "{\"severity\":\"info2\",\"message\":\"b\"}",
                "{\"severity\":\"251\",\"message\":\"c\"}",
            ]
        );
    }

    #[test]
    fn test_caller_points_at_call_site() {
        let (logger, memory) = memory_logger(
            Config::default()
                .with_timestamp_field(false)
                .with_severity_field(false)
                .with_message_field(false),
        );
        logger.info("", &[]);
        let line = line!() - 1;

        assert_eq!(
            memory.lines(),
            [format!("{{\"caller\":\"core/logger.rs:{}\"}}", line)]
        );
    }

    #[test]
    fn test_long_caller() {
        let (logger, memory) = memory_logger(
            Config::default()
                .with_timestamp_field(false)
                .with_severity_field(false)
                .with_message_field(false)
                .with_short_caller(false),
        );
        logger.info("", &[]);
        let line = line!() - 1;

        let value: serde_json::Value = serde_json::from_str(&memory.lines()[0]).unwrap();
        assert_eq!(
            value["caller"].as_str().unwrap(),
            format!("{}:{}", file!(), line)
        );
    }

    #[test]
    fn test_derivation_does_not_mutate_source() {
        let (logger, _memory) = memory_logger(quiet_config());
        let logger = logger.with(&[Field::string("service", "api")]);

        let config_before = logger.config().clone();
        let severities_before = logger.severities();
        let context_before = logger.context_fields().to_vec();

        let copied = logger.copy();
        copied.add_custom_severity(Severity(1), "trace", "TRACE").unwrap();
        let _with = logger.with(&[Field::bool("extra", true)]);
        let _renewed = logger
            .renew(&[ConfigOption::MessageFieldKey("msg".to_string())])
            .unwrap();
        let _rewritten = logger.renew_writer(Arc::new(MemoryAppender::new()));
        let skipped = logger.add_caller_skip(2).add_caller_skip(1);

        assert_eq!(logger.config(), &config_before);
        assert_eq!(logger.severities(), severities_before);
        assert_eq!(logger.context_fields(), context_before.as_slice());
        assert!(copied.severities().contains(Severity(1)));
        assert_eq!(skipped.config().caller_skip, 3);
        assert_eq!(logger.config().caller_skip, 0);
    }

    fn log_through_helper(logger: &Logger) -> u32 {
        logger.info("", &[]);
        line!() - 1
    }

    #[test]
    fn test_caller_skip_blames_outer_frame() {
        let (logger, memory) = memory_logger(
            Config::default()
                .with_timestamp_field(false)
                .with_severity_field(false)
                .with_message_field(false),
        );

        let helper_line = log_through_helper(&logger);
        log_through_helper(&logger.add_caller_skip(1));
        let outer_line = line!() - 1;
        log_through_helper(&logger.renew(&[ConfigOption::CallerSkip(1)]).unwrap());
        let renewed_line = line!() - 1;

        assert_eq!(
            memory.lines(),
            [
                format!("{{\"caller\":\"core/logger.rs:{}\"}}", helper_line),
                format!("{{\"caller\":\"core/logger.rs:{}\"}}", outer_line),
                format!("{{\"caller\":\"core/logger.rs:{}\"}}", renewed_line),
            ]
        );
    }

    #[test]
    fn test_caller_skip_past_the_stack_renders_unknown() {
        let (logger, memory) = memory_logger(
            Config::default()
                .with_timestamp_field(false)
                .with_severity_field(false)
                .with_message_field(false)
                .with_caller_skip(100_000),
        );
        logger.info("", &[]);
        assert_eq!(memory.lines(), ["{\"caller\":\":0\"}"]);
    }

    #[test]
    fn test_with_accumulates_context() {
        let (logger, memory) = memory_logger(quiet_config());
        let child = logger
            .with(&[Field::string("a", "1")])
            .with(&[Field::u8("b", 2)]);

        child.info("m", &[Field::bool("c", true)]);
        logger.info("m", &[]);

        assert_eq!(
            memory.lines(),
            [
                "{\"severity\":\"INFO\",\"message\":\"m\",\"a\":\"1\",\"b\":2,\"c\":true}",
                "{\"severity\":\"INFO\",\"message\":\"m\"}",
            ]
        );
    }

    #[test]
    fn test_renew_writer() {
        let (logger, first) = memory_logger(quiet_config());
        let second = MemoryAppender::new();
        let renewed = logger.renew_writer(Arc::new(second.clone()));

        renewed.info("to second", &[]);
        assert!(first.contents().is_empty());
        assert_eq!(second.lines().len(), 1);
    }

    #[test]
    fn test_renew_failure_is_named() {
        let (logger, _memory) = memory_logger(quiet_config());
        let err = logger
            .renew(&[ConfigOption::MessageFieldKey(String::new())])
            .unwrap_err();
        assert!(matches!(err, LoggerError::EmptyKey { field: "message_field_key" }));
    }

    #[test]
    fn test_write_failure_reported_through_default_logger() {
        let _lock = TEST_LOCK.lock();
        let (default, memory) = memory_logger(quiet_config());
        let restore = replace_default_logger(Arc::new(default));

        let failing = Logger::with_config(Arc::new(FailingAppender), quiet_config()).unwrap();
        failing.info("lost", &[]);
        restore();

        assert_eq!(
            memory.lines(),
            ["{\"severity\":\"ERROR\",\"message\":\"rec_logger::Logger::write: writer=failing: write: pipe closed\",\"error\":\"pipe closed\"}"]
        );
    }

    #[test]
    fn test_write_failure_does_not_recurse() {
        let _lock = TEST_LOCK.lock();
        let failing = Arc::new(
            Logger::with_config(Arc::new(FailingAppender), quiet_config()).unwrap(),
        );
        let restore = replace_default_logger(Arc::clone(&failing));

        failing.error("lost", &[]);
        failing.error("lost again", &[]);
        restore();

        assert!(!REPORTING_WRITE_FAILURE.with(Cell::get));
    }

    #[test]
    fn test_replace_default_logger_restores() {
        let _lock = TEST_LOCK.lock();
        let original = default_logger();
        let (replacement, _memory) = memory_logger(quiet_config());
        let replacement = Arc::new(replacement);

        let restore = replace_default_logger(Arc::clone(&replacement));
        assert!(Arc::ptr_eq(&default_logger(), &replacement));
        restore();
        assert!(Arc::ptr_eq(&default_logger(), &original));
    }

    static EXIT_CODE: std::sync::atomic::AtomicI32 = std::sync::atomic::AtomicI32::new(-1);

    fn record_exit(code: i32) {
        EXIT_CODE.store(code, std::sync::atomic::Ordering::SeqCst);
    }

    #[test]
    fn test_fatal_writes_then_exits() {
        let _lock = TEST_LOCK.lock();
        let (logger, memory) = memory_logger(quiet_config());
        let restore = replace_exit_fn(record_exit);

        logger.fatal(Severity::CRITICAL, "shutting down", &[]);
        restore();

        assert_eq!(EXIT_CODE.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(
            memory.lines(),
            ["{\"severity\":\"CRITICAL\",\"message\":\"shutting down\"}"]
        );
    }

    #[test]
    fn test_panic_writes_then_panics() {
        let (logger, memory) = memory_logger(quiet_config());
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.panic(Severity::ALERT, "unrecoverable", &[]);
        }));

        let payload = result.unwrap_err();
        assert_eq!(payload.downcast_ref::<String>().unwrap(), "unrecoverable");
        assert_eq!(memory.lines().len(), 1);
    }

    #[test]
    fn test_builder() {
        let memory = MemoryAppender::new();
        let logger = Logger::builder()
            .config(quiet_config())
            .option(ConfigOption::HostnameFieldValue("h".to_string()))
            .appender(Arc::new(memory.clone()))
            .build()
            .unwrap();

        logger.info("built", &[]);
        assert_eq!(logger.config().hostname_field_value, "h");
        assert_eq!(memory.lines().len(), 1);
    }

    #[test]
    fn test_clone_is_copy() {
        let (logger, memory) = memory_logger(quiet_config());
        let cloned = logger.with(&[Field::i8("n", -1)]).clone();
        cloned.info("x", &[]);
        assert_eq!(
            memory.lines(),
            ["{\"severity\":\"INFO\",\"message\":\"x\",\"n\":-1}"]
        );
    }
}
