//! Named configuration mutations
//!
//! Options are applied in order on top of [`Config::new`] by
//! [`Logger::new`](super::Logger::new), or on top of a copied configuration
//! by [`Logger::renew`](super::Logger::renew).

use super::config::{os_hostname, Config};
use super::error::{LoggerError, Result};
use super::severity::Severity;
use super::timestamp::TimestampFormat;
use std::io;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOption {
    UseTimestampField(bool),
    TimestampFieldKey(String),
    TimestampFieldFormat(TimestampFormat),
    UseSeverityField(bool),
    SeverityFieldKey(String),
    SeverityThreshold(Severity),
    UseUppercaseSeverity(bool),
    /// Also queries the OS hostname; fails if it is unavailable
    UseHostnameField(bool),
    HostnameFieldKey(String),
    HostnameFieldValue(String),
    UseCallerField(bool),
    CallerFieldKey(String),
    UseShortCaller(bool),
    /// Adds to the current skip rather than replacing it
    CallerSkip(usize),
    UseMessageField(bool),
    MessageFieldKey(String),
    LineSeparator(String),
}

impl ConfigOption {
    pub fn name(&self) -> &'static str {
        match self {
            ConfigOption::UseTimestampField(_) => "UseTimestampField",
            ConfigOption::TimestampFieldKey(_) => "TimestampFieldKey",
            ConfigOption::TimestampFieldFormat(_) => "TimestampFieldFormat",
            ConfigOption::UseSeverityField(_) => "UseSeverityField",
            ConfigOption::SeverityFieldKey(_) => "SeverityFieldKey",
            ConfigOption::SeverityThreshold(_) => "SeverityThreshold",
            ConfigOption::UseUppercaseSeverity(_) => "UseUppercaseSeverity",
            ConfigOption::UseHostnameField(_) => "UseHostnameField",
            ConfigOption::HostnameFieldKey(_) => "HostnameFieldKey",
            ConfigOption::HostnameFieldValue(_) => "HostnameFieldValue",
            ConfigOption::UseCallerField(_) => "UseCallerField",
            ConfigOption::CallerFieldKey(_) => "CallerFieldKey",
            ConfigOption::UseShortCaller(_) => "UseShortCaller",
            ConfigOption::CallerSkip(_) => "CallerSkip",
            ConfigOption::UseMessageField(_) => "UseMessageField",
            ConfigOption::MessageFieldKey(_) => "MessageFieldKey",
            ConfigOption::LineSeparator(_) => "LineSeparator",
        }
    }

    /// Apply to `config`, wrapping any failure in
    /// [`LoggerError::OptionFailed`] naming this option
    pub fn apply(&self, config: &mut Config) -> Result<()> {
        self.apply_with(config, os_hostname)
    }

    pub(crate) fn apply_with(
        &self,
        config: &mut Config,
        hostname: impl FnOnce() -> io::Result<String>,
    ) -> Result<()> {
        match self {
            ConfigOption::UseTimestampField(use_field) => config.use_timestamp_field = *use_field,
            ConfigOption::TimestampFieldKey(key) => config.timestamp_field_key = key.clone(),
            ConfigOption::TimestampFieldFormat(format) => {
                config.timestamp_field_format = format.clone()
            }
            ConfigOption::UseSeverityField(use_field) => config.use_severity_field = *use_field,
            ConfigOption::SeverityFieldKey(key) => config.severity_field_key = key.clone(),
            ConfigOption::SeverityThreshold(severity) => config.severity_threshold = *severity,
            ConfigOption::UseUppercaseSeverity(uppercase) => {
                config.use_uppercase_severity = *uppercase
            }
            ConfigOption::UseHostnameField(use_field) => {
                let name = hostname().map_err(|e| {
                    LoggerError::option_failed(self.name(), LoggerError::HostnameLookup(e))
                })?;
                config.use_hostname_field = *use_field;
                config.hostname_field_value = name;
            }
            ConfigOption::HostnameFieldKey(key) => config.hostname_field_key = key.clone(),
            ConfigOption::HostnameFieldValue(value) => config.hostname_field_value = value.clone(),
            ConfigOption::UseCallerField(use_field) => config.use_caller_field = *use_field,
            ConfigOption::CallerFieldKey(key) => config.caller_field_key = key.clone(),
            ConfigOption::UseShortCaller(short) => config.use_short_caller = *short,
            ConfigOption::CallerSkip(skip) => {
                config.caller_skip = config.caller_skip.saturating_add(*skip)
            }
            ConfigOption::UseMessageField(use_field) => config.use_message_field = *use_field,
            ConfigOption::MessageFieldKey(key) => config.message_field_key = key.clone(),
            ConfigOption::LineSeparator(separator) => config.line_separator = separator.clone(),
        }
        Ok(())
    }
}

/// Apply options in order, stopping at the first failure
pub fn apply_options(config: &mut Config, options: &[ConfigOption]) -> Result<()> {
    options.iter().try_for_each(|option| option.apply(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_in_order() {
        let mut config = Config::default();
        apply_options(
            &mut config,
            &[
                ConfigOption::MessageFieldKey("msg".to_string()),
                ConfigOption::SeverityThreshold(Severity::INFO),
                ConfigOption::MessageFieldKey("text".to_string()),
                ConfigOption::TimestampFieldFormat(TimestampFormat::Unix),
                ConfigOption::LineSeparator("\r\n".to_string()),
            ],
        )
        .unwrap();

        assert_eq!(config.message_field_key, "text");
        assert_eq!(config.severity_threshold, Severity::INFO);
        assert_eq!(config.timestamp_field_format, TimestampFormat::Unix);
        assert_eq!(config.line_separator, "\r\n");
    }

    #[test]
    fn test_use_hostname_field_queries_hostname() {
        let mut config = Config::default();
        ConfigOption::UseHostnameField(true)
            .apply_with(&mut config, || Ok("api-7".to_string()))
            .unwrap();

        assert!(config.use_hostname_field);
        assert_eq!(config.hostname_field_value, "api-7");
    }

    #[test]
    fn test_use_hostname_field_failure_is_named() {
        let mut config = Config::default();
        let err = ConfigOption::UseHostnameField(true)
            .apply_with(&mut config, || Err(io::Error::other("lookup failed")))
            .unwrap_err();

        assert!(matches!(
            err,
            LoggerError::OptionFailed {
                option: "UseHostnameField",
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "UseHostnameField: hostname lookup failed: lookup failed"
        );
        assert!(!config.use_hostname_field);
    }

    #[test]
    fn test_caller_skip_accumulates() {
        let mut config = Config::default().with_caller_skip(1);
        apply_options(
            &mut config,
            &[ConfigOption::CallerSkip(2), ConfigOption::CallerSkip(3)],
        )
        .unwrap();
        assert_eq!(config.caller_skip, 6);

        ConfigOption::CallerSkip(usize::MAX).apply(&mut config).unwrap();
        assert_eq!(config.caller_skip, usize::MAX);
    }

    #[test]
    fn test_option_names() {
        assert_eq!(ConfigOption::UseShortCaller(true).name(), "UseShortCaller");
        assert_eq!(
            ConfigOption::HostnameFieldValue(String::new()).name(),
            "HostnameFieldValue"
        );
    }
}
