//! Logger configuration

use super::error::{LoggerError, Result};
use super::severity::Severity;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::io;

pub const DEFAULT_HOSTNAME: &str = "localhost";
pub const DEFAULT_LINE_SEPARATOR: &str = "\n";

/// Which record blocks are emitted, under which keys, and how
///
/// `Config::default()` is deterministic (hostname `localhost`);
/// [`Config::new`] fills in the OS hostname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub use_timestamp_field: bool,
    pub timestamp_field_key: String,
    pub timestamp_field_format: TimestampFormat,

    pub use_severity_field: bool,
    pub severity_field_key: String,
    /// Records below this level are dropped
    pub severity_threshold: Severity,
    pub use_uppercase_severity: bool,

    pub use_hostname_field: bool,
    pub hostname_field_key: String,
    pub hostname_field_value: String,

    pub use_caller_field: bool,
    pub caller_field_key: String,
    /// Keep only the last two segments of the caller path
    pub use_short_caller: bool,
    /// Stack frames to skip above the call site when resolving the caller
    pub caller_skip: usize,

    pub use_message_field: bool,
    pub message_field_key: String,

    /// Appended after every record
    pub line_separator: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_timestamp_field: true,
            timestamp_field_key: "timestamp".to_string(),
            timestamp_field_format: TimestampFormat::Rfc3339Nano,
            use_severity_field: true,
            severity_field_key: "severity".to_string(),
            severity_threshold: Severity::DEFAULT,
            use_uppercase_severity: true,
            use_hostname_field: false,
            hostname_field_key: "hostname".to_string(),
            hostname_field_value: DEFAULT_HOSTNAME.to_string(),
            use_caller_field: true,
            caller_field_key: "caller".to_string(),
            use_short_caller: true,
            caller_skip: 0,
            use_message_field: true,
            message_field_key: "message".to_string(),
            line_separator: DEFAULT_LINE_SEPARATOR.to_string(),
        }
    }
}

impl Config {
    /// Default configuration with the OS hostname, or `localhost` if it
    /// cannot be determined
    pub fn new() -> Self {
        Self::with_hostname_from(os_hostname)
    }

    pub(crate) fn with_hostname_from(hostname: impl FnOnce() -> io::Result<String>) -> Self {
        Self {
            hostname_field_value: hostname().unwrap_or_else(|_| DEFAULT_HOSTNAME.to_string()),
            ..Self::default()
        }
    }

    /// Reject enabled blocks with an empty key
    pub fn validate(&self) -> Result<()> {
        let blocks = [
            (self.use_timestamp_field, &self.timestamp_field_key, "timestamp_field_key"),
            (self.use_severity_field, &self.severity_field_key, "severity_field_key"),
            (self.use_hostname_field, &self.hostname_field_key, "hostname_field_key"),
            (self.use_caller_field, &self.caller_field_key, "caller_field_key"),
            (self.use_message_field, &self.message_field_key, "message_field_key"),
        ];

        for (enabled, key, name) in blocks {
            if enabled && key.is_empty() {
                return Err(LoggerError::empty_key(name));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn with_timestamp_field(mut self, enabled: bool) -> Self {
        self.use_timestamp_field = enabled;
        self
    }

    #[must_use]
    pub fn with_timestamp_field_key(mut self, key: impl Into<String>) -> Self {
        self.timestamp_field_key = key.into();
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<TimestampFormat>) -> Self {
        self.timestamp_field_format = format.into();
        self
    }

    #[must_use]
    pub fn with_severity_field(mut self, enabled: bool) -> Self {
        self.use_severity_field = enabled;
        self
    }

    #[must_use]
    pub fn with_severity_field_key(mut self, key: impl Into<String>) -> Self {
        self.severity_field_key = key.into();
        self
    }

    #[must_use]
    pub fn with_severity_threshold(mut self, threshold: Severity) -> Self {
        self.severity_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_uppercase_severity(mut self, uppercase: bool) -> Self {
        self.use_uppercase_severity = uppercase;
        self
    }

    #[must_use]
    pub fn with_hostname_field(mut self, enabled: bool) -> Self {
        self.use_hostname_field = enabled;
        self
    }

    #[must_use]
    pub fn with_hostname_field_key(mut self, key: impl Into<String>) -> Self {
        self.hostname_field_key = key.into();
        self
    }

    #[must_use]
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname_field_value = hostname.into();
        self
    }

    #[must_use]
    pub fn with_caller_field(mut self, enabled: bool) -> Self {
        self.use_caller_field = enabled;
        self
    }

    #[must_use]
    pub fn with_caller_field_key(mut self, key: impl Into<String>) -> Self {
        self.caller_field_key = key.into();
        self
    }

    #[must_use]
    pub fn with_short_caller(mut self, short: bool) -> Self {
        self.use_short_caller = short;
        self
    }

    #[must_use]
    pub fn with_caller_skip(mut self, skip: usize) -> Self {
        self.caller_skip = skip;
        self
    }

    #[must_use]
    pub fn with_message_field(mut self, enabled: bool) -> Self {
        self.use_message_field = enabled;
        self
    }

    #[must_use]
    pub fn with_message_field_key(mut self, key: impl Into<String>) -> Self {
        self.message_field_key = key.into();
        self
    }

    #[must_use]
    pub fn with_line_separator(mut self, separator: impl Into<String>) -> Self {
        self.line_separator = separator.into();
        self
    }
}

/// Query the OS hostname
///
/// A name that is not valid UTF-8 is reported as `InvalidData`.
pub fn os_hostname() -> io::Result<String> {
    hostname::get()?.into_string().map_err(|name| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("hostname is not valid UTF-8: {:?}", name),
        )
    })
}
