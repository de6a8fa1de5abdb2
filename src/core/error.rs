//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// An enabled record block has an empty JSON key
    #[error("Config.{field} is empty")]
    EmptyKey { field: &'static str },

    /// A configuration option failed while being applied
    #[error("{option}: {source}")]
    OptionFailed {
        option: &'static str,
        #[source]
        source: Box<LoggerError>,
    },

    /// The OS hostname could not be queried
    #[error("hostname lookup failed: {0}")]
    HostnameLookup(#[source] std::io::Error),

    /// A custom severity collides with an existing level or name
    #[error("{what}: severity already exists")]
    SeverityAlreadyExists { what: String },

    #[error("severity lowercase is empty")]
    SeverityLowercaseIsEmpty,

    #[error("severity uppercase is empty")]
    SeverityUppercaseIsEmpty,

    /// Writing a record to the destination stream failed
    #[error("rec_logger::Logger::write: writer={writer}: write: {source}")]
    WriteFailed {
        writer: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoggerError {
    /// Create an empty-key configuration error
    pub fn empty_key(field: &'static str) -> Self {
        LoggerError::EmptyKey { field }
    }

    /// Wrap an error raised by the named option
    pub fn option_failed(option: &'static str, source: LoggerError) -> Self {
        LoggerError::OptionFailed {
            option,
            source: Box::new(source),
        }
    }

    /// Create a duplicate-severity error
    pub fn severity_exists(what: impl Into<String>) -> Self {
        LoggerError::SeverityAlreadyExists { what: what.into() }
    }

    /// Create a write failure error for the named writer
    pub fn write_failed(writer: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::WriteFailed {
            writer: writer.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::empty_key("severity_field_key");
        assert!(matches!(err, LoggerError::EmptyKey { .. }));

        let err = LoggerError::severity_exists("severity=150");
        assert!(matches!(err, LoggerError::SeverityAlreadyExists { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::empty_key("message_field_key");
        assert_eq!(err.to_string(), "Config.message_field_key is empty");

        let err = LoggerError::severity_exists("lowercase=info");
        assert_eq!(err.to_string(), "lowercase=info: severity already exists");

        let err = LoggerError::option_failed(
            "UseHostnameField",
            LoggerError::HostnameLookup(std::io::Error::other("no name")),
        );
        assert_eq!(
            err.to_string(),
            "UseHostnameField: hostname lookup failed: no name"
        );
    }

    #[test]
    fn test_write_failed_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = LoggerError::write_failed("file(/tmp/app.log)", io_err);

        assert!(err.to_string().contains("writer=file(/tmp/app.log)"));
        assert!(err.to_string().contains("pipe closed"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
