//! Property-based tests for rec_logger using proptest

use proptest::prelude::*;
use rec_logger::core::append::{append_duration, append_escaped, append_quoted};
use rec_logger::prelude::*;
use serde_json::Value;
use std::sync::Arc;

// ============================================================================
// Escaping Tests (Security Critical!)
// ============================================================================

proptest! {
    /// Quoted output must decode back to the original string
    #[test]
    fn test_quoted_string_roundtrip(s in any::<String>()) {
        let mut buf = Vec::new();
        append_quoted(&mut buf, &s);
        let decoded: String = serde_json::from_slice(&buf).unwrap();
        prop_assert_eq!(decoded, s);
    }

    /// Escaped output never contains raw control characters
    #[test]
    fn test_escaped_has_no_control_bytes(s in any::<String>()) {
        let mut buf = Vec::new();
        append_escaped(&mut buf, &s);
        prop_assert!(buf.iter().all(|b| *b >= 0x20));
    }

    /// Strings without special characters are copied unchanged
    #[test]
    fn test_plain_strings_are_identity(s in "[a-zA-Z0-9 _./:-]*") {
        let mut buf = Vec::new();
        append_escaped(&mut buf, &s);
        prop_assert_eq!(buf, s.as_bytes());
    }
}

// ============================================================================
// Numeric Field Tests
// ============================================================================

proptest! {
    #[test]
    fn test_signed_integers(value in any::<i64>()) {
        let field = Field::i64("n", value);
        prop_assert_eq!(field.to_json_string(), format!("\"n\":{}", value));
    }

    #[test]
    fn test_unsigned_integers(value in any::<u64>()) {
        let field = Field::u64("n", value);
        prop_assert_eq!(field.to_json_string(), format!("\"n\":{}", value));
    }

    /// Finite floats render as plain JSON numbers without an exponent
    #[test]
    fn test_finite_floats_are_numbers(value in prop::num::f64::NORMAL | prop::num::f64::ZERO | prop::num::f64::SUBNORMAL) {
        let rendered = Field::f64("x", value).to_json_string();
        prop_assert!(!rendered.contains('e') && !rendered.contains('E'), "{}", rendered);

        let parsed: Value = serde_json::from_str(&format!("{{{}}}", rendered)).unwrap();
        prop_assert!(parsed["x"].is_number());
    }

    #[test]
    fn test_duration_text_is_never_empty(nanos in any::<i64>()) {
        let mut buf = Vec::new();
        append_duration(&mut buf, nanos);
        let text = String::from_utf8(buf).unwrap();
        prop_assert!(text.ends_with('s'), "{}", text);
        prop_assert_eq!(text.starts_with('-'), nanos < 0);
    }
}

// ============================================================================
// Severity Tests
// ============================================================================

proptest! {
    /// Display output parses back to the same severity
    #[test]
    fn test_severity_display_roundtrip(level in any::<i32>()) {
        let severity = Severity(level);
        let parsed: Severity = severity.to_string().parse().unwrap();
        prop_assert_eq!(parsed, severity);
    }

    #[test]
    fn test_severity_ordering(a in any::<i32>(), b in any::<i32>()) {
        prop_assert_eq!(Severity(a) < Severity(b), a < b);
    }
}

// ============================================================================
// Record Tests
// ============================================================================

fn record_logger(memory: &MemoryAppender) -> Logger {
    Logger::with_config(Arc::new(memory.clone()), Config::default()).unwrap()
}

proptest! {
    /// Every record is one line of valid JSON whatever the input
    #[test]
    fn test_record_is_single_json_line(
        message in any::<String>(),
        key in any::<String>(),
        value in any::<String>(),
        number in any::<f64>(),
    ) {
        let memory = MemoryAppender::new();
        let logger = record_logger(&memory);
        let key = format!("field.{}", key);
        logger.info(&message, &[
            Field::string(key.clone(), value.clone()),
            Field::f64("number", number),
        ]);

        let contents = memory.contents();
        prop_assert!(contents.ends_with('\n'));
        prop_assert_eq!(contents.matches('\n').count(), 1);

        let record: Value = serde_json::from_str(contents.trim_end()).unwrap();
        prop_assert_eq!(record["message"].as_str(), Some(message.as_str()));
        prop_assert_eq!(record[key.as_str()].as_str(), Some(value.as_str()));
    }

    /// Records below the threshold are never written
    #[test]
    fn test_threshold_filters(threshold in -1000i32..1000, level in -1000i32..1000) {
        let memory = MemoryAppender::new();
        let logger = record_logger(&memory)
            .renew(&[ConfigOption::SeverityThreshold(Severity(threshold))])
            .unwrap();
        logger.print(Severity(level), "m", &[]);
        prop_assert_eq!(memory.contents().is_empty(), level < threshold);
    }
}
