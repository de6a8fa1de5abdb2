//! Severity definitions and the per-logger severity name registry

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Ordered numeric log level
///
/// Built-in levels are spaced by 100 so custom levels can be interleaved
/// between them (see [`SeverityRegistry::register`]).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Severity(pub i32);

impl Severity {
    pub const DEFAULT: Severity = Severity(0);
    pub const DEBUG: Severity = Severity(100);
    pub const INFO: Severity = Severity(200);
    pub const NOTICE: Severity = Severity(300);
    pub const WARNING: Severity = Severity(400);
    pub const ERROR: Severity = Severity(500);
    pub const CRITICAL: Severity = Severity(600);
    pub const ALERT: Severity = Severity(700);
    pub const EMERGENCY: Severity = Severity(800);

    /// Built-in levels in ascending order
    pub const BUILTIN: [Severity; 9] = [
        Severity::DEFAULT,
        Severity::DEBUG,
        Severity::INFO,
        Severity::NOTICE,
        Severity::WARNING,
        Severity::ERROR,
        Severity::CRITICAL,
        Severity::ALERT,
        Severity::EMERGENCY,
    ];

    pub const fn level(self) -> i32 {
        self.0
    }

    /// Fixed lowercase name of a built-in level
    pub fn builtin_lowercase(self) -> Option<&'static str> {
        let name = match self {
            Severity::DEFAULT => "default",
            Severity::DEBUG => "debug",
            Severity::INFO => "info",
            Severity::NOTICE => "notice",
            Severity::WARNING => "warning",
            Severity::ERROR => "error",
            Severity::CRITICAL => "critical",
            Severity::ALERT => "alert",
            Severity::EMERGENCY => "emergency",
            _ => return None,
        };
        Some(name)
    }

    /// Fixed uppercase name of a built-in level
    pub fn builtin_uppercase(self) -> Option<&'static str> {
        let name = match self {
            Severity::DEFAULT => "DEFAULT",
            Severity::DEBUG => "DEBUG",
            Severity::INFO => "INFO",
            Severity::NOTICE => "NOTICE",
            Severity::WARNING => "WARNING",
            Severity::ERROR => "ERROR",
            Severity::CRITICAL => "CRITICAL",
            Severity::ALERT => "ALERT",
            Severity::EMERGENCY => "EMERGENCY",
            _ => return None,
        };
        Some(name)
    }
}

impl From<i32> for Severity {
    fn from(level: i32) -> Self {
        Severity(level)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.builtin_uppercase() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    /// Accepts a built-in name in any case, or a bare integer level
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();

        if let Some(severity) = Severity::BUILTIN
            .into_iter()
            .find(|severity| severity.builtin_uppercase() == Some(upper.as_str()))
        {
            return Ok(severity);
        }

        upper
            .parse::<i32>()
            .map(Severity)
            .map_err(|_| format!("Invalid severity: '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SeverityNames {
    lowercase: String,
    uppercase: String,
}

/// Mapping from level to display names
///
/// Pre-populated with the nine built-in levels. Cloning produces an
/// independent registry, which is how derived loggers get their own copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityRegistry {
    names: HashMap<Severity, SeverityNames>,
}

impl Default for SeverityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SeverityRegistry {
    pub fn new() -> Self {
        let names = Severity::BUILTIN
            .into_iter()
            .filter_map(|severity| {
                let lowercase = severity.builtin_lowercase()?;
                let uppercase = severity.builtin_uppercase()?;
                Some((
                    severity,
                    SeverityNames {
                        lowercase: lowercase.to_string(),
                        uppercase: uppercase.to_string(),
                    },
                ))
            })
            .collect();

        Self { names }
    }

    /// Register display names for a custom level
    ///
    /// Fails when either name is empty, or when the level or one of the names
    /// is already taken (built-in levels included).
    pub fn register(&mut self, severity: Severity, lowercase: &str, uppercase: &str) -> Result<()> {
        if lowercase.is_empty() {
            return Err(LoggerError::SeverityLowercaseIsEmpty);
        }
        if uppercase.is_empty() {
            return Err(LoggerError::SeverityUppercaseIsEmpty);
        }

        for (existing, names) in &self.names {
            if *existing == severity {
                return Err(LoggerError::severity_exists(format!(
                    "severity={}",
                    severity.0
                )));
            }
            if names.lowercase == lowercase {
                return Err(LoggerError::severity_exists(format!(
                    "lowercase={}",
                    lowercase
                )));
            }
            if names.uppercase == uppercase {
                return Err(LoggerError::severity_exists(format!(
                    "uppercase={}",
                    uppercase
                )));
            }
        }

        self.names.insert(
            severity,
            SeverityNames {
                lowercase: lowercase.to_string(),
                uppercase: uppercase.to_string(),
            },
        );
        Ok(())
    }

    pub fn contains(&self, severity: Severity) -> bool {
        self.names.contains_key(&severity)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Lowercase display name: built-in, then registered, then the bare level
    pub fn lowercase(&self, severity: Severity) -> Cow<'_, str> {
        if let Some(name) = severity.builtin_lowercase() {
            return Cow::Borrowed(name);
        }
        match self.names.get(&severity) {
            Some(names) => Cow::Borrowed(&names.lowercase),
            None => Cow::Owned(severity.0.to_string()),
        }
    }

    /// Uppercase display name: built-in, then registered, then the bare level
    pub fn uppercase(&self, severity: Severity) -> Cow<'_, str> {
        if let Some(name) = severity.builtin_uppercase() {
            return Cow::Borrowed(name);
        }
        match self.names.get(&severity) {
            Some(names) => Cow::Borrowed(&names.uppercase),
            None => Cow::Owned(severity.0.to_string()),
        }
    }

    pub fn name(&self, severity: Severity, uppercase: bool) -> Cow<'_, str> {
        if uppercase {
            self.uppercase(severity)
        } else {
            self.lowercase(severity)
        }
    }
}
