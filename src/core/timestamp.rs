//! Timestamp format selection
//!
//! A [`TimestampFormat`] is either one of the numeric Unix encodings, which
//! render as unquoted JSON numbers, or a layout, which renders as a quoted
//! JSON string. Layouts can be named by keyword (see [`TimestampFormat::from_layout`]).

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Timestamp encoding for the record timestamp and for time fields
///
/// # Examples
///
/// ```
/// use rec_logger::core::TimestampFormat;
///
/// assert_eq!(TimestampFormat::from_layout("UNIXMILLI"), TimestampFormat::UnixMillis);
/// assert_eq!(
///     TimestampFormat::from_layout("%d/%b/%Y:%H:%M:%S %z"),
///     TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string())
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// RFC 3339 with as many fractional digits as needed:
    /// `2025-01-08T10:30:45.123456789Z`
    #[default]
    Rfc3339Nano,

    /// RFC 3339 to the second: `2025-01-08T10:30:45+09:00`
    Rfc3339,

    /// ISO 8601 in UTC with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// Unix seconds with a decimal fraction: `1736332245.123`
    UnixDecimal,

    /// Unix seconds: `1736332245`
    Unix,

    /// Unix milliseconds: `1736332245123`
    UnixMillis,

    /// Unix microseconds: `1736332245123456`
    UnixMicros,

    /// Any strftime-compatible layout
    Custom(String),
}

impl TimestampFormat {
    /// Resolve a layout keyword or a strftime layout
    ///
    /// `UNIXDECIMAL` (or the empty string), `UNIX`, `UNIXMILLI` and
    /// `UNIXMICRO` select the numeric encodings; `RFC3339NANO`, `RFC3339`
    /// and `ISO8601` the named layouts. Anything else is a custom layout.
    pub fn from_layout(layout: &str) -> Self {
        match layout {
            "" | "UNIXDECIMAL" => TimestampFormat::UnixDecimal,
            "UNIX" => TimestampFormat::Unix,
            "UNIXMILLI" => TimestampFormat::UnixMillis,
            "UNIXMICRO" => TimestampFormat::UnixMicros,
            "RFC3339NANO" => TimestampFormat::Rfc3339Nano,
            "RFC3339" => TimestampFormat::Rfc3339,
            "ISO8601" => TimestampFormat::Iso8601,
            custom => TimestampFormat::Custom(custom.to_string()),
        }
    }

    /// Check if this format renders as a JSON number
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TimestampFormat::UnixDecimal
                | TimestampFormat::Unix
                | TimestampFormat::UnixMillis
                | TimestampFormat::UnixMicros
        )
    }
}

impl From<&str> for TimestampFormat {
    fn from(layout: &str) -> Self {
        TimestampFormat::from_layout(layout)
    }
}

static DEFAULT_TIME_FORMAT: RwLock<Option<TimestampFormat>> = RwLock::new(None);

/// Format used by time fields that carry no format of their own
pub fn default_time_format() -> TimestampFormat {
    DEFAULT_TIME_FORMAT.read().clone().unwrap_or_default()
}

/// Replace the process-wide format for time fields
///
/// Returns the previous format.
pub fn set_default_time_format(format: TimestampFormat) -> TimestampFormat {
    let previous = DEFAULT_TIME_FORMAT.write().replace(format);
    previous.unwrap_or_default()
}
