//! Byte-level rendering primitives
//!
//! Every function here appends directly to a caller-owned `Vec<u8>` so the
//! record path never builds intermediate strings for the common cases:
//! JSON string escaping, integers, floats (including NaN and infinities),
//! timestamps in their numeric and layout forms, caller locations and
//! human-readable durations.

use super::timestamp::TimestampFormat;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io::Write as _;

const HEX: &[u8; 16] = b"0123456789abcdef";
const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Declared bit width of a floating point value
///
/// Values are stored widened to `f64`; the width decides which shortest
/// round-trip representation is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloatWidth {
    F32,
    F64,
}

/// Append `s` with JSON string escaping applied (no surrounding quotes)
#[inline]
pub fn append_escaped(dst: &mut Vec<u8>, s: &str) {
    append_escaped_bytes(dst, s.as_bytes());
}

/// Append raw bytes with JSON string escaping applied
///
/// Only `"`, `\` and bytes `0x00..=0x1F` are rewritten. Everything else,
/// including bytes of multi-byte sequences, is copied through unchanged.
pub fn append_escaped_bytes(dst: &mut Vec<u8>, bytes: &[u8]) {
    let mut start = 0;

    for (i, &b) in bytes.iter().enumerate() {
        if b > 0x1F && b != b'"' && b != b'\\' {
            continue;
        }

        dst.extend_from_slice(&bytes[start..i]);
        match b {
            b'"' | b'\\' => dst.extend_from_slice(&[b'\\', b]),
            0x08 => dst.extend_from_slice(b"\\b"),
            0x0C => dst.extend_from_slice(b"\\f"),
            b'\n' => dst.extend_from_slice(b"\\n"),
            b'\r' => dst.extend_from_slice(b"\\r"),
            b'\t' => dst.extend_from_slice(b"\\t"),
            _ => dst.extend_from_slice(&[
                b'\\',
                b'u',
                b'0',
                b'0',
                HEX[(b >> 4) as usize],
                HEX[(b & 0x0f) as usize],
            ]),
        }
        start = i + 1;
    }

    dst.extend_from_slice(&bytes[start..]);
}

/// Append `s` as a quoted, escaped JSON string
#[inline]
pub fn append_quoted(dst: &mut Vec<u8>, s: &str) {
    dst.push(b'"');
    append_escaped(dst, s);
    dst.push(b'"');
}

#[inline]
pub fn append_i64(dst: &mut Vec<u8>, value: i64) {
    let _ = write!(dst, "{}", value);
}

#[inline]
pub fn append_u64(dst: &mut Vec<u8>, value: u64) {
    let _ = write!(dst, "{}", value);
}

/// Append a float as a JSON value
///
/// NaN and the infinities are not representable as JSON numbers and are
/// rendered as the strings `"NaN"`, `"+Inf"` and `"-Inf"`.
pub fn append_float(dst: &mut Vec<u8>, value: f64, width: FloatWidth) {
    if value.is_nan() {
        dst.extend_from_slice(b"\"NaN\"");
    } else if value == f64::INFINITY {
        dst.extend_from_slice(b"\"+Inf\"");
    } else if value == f64::NEG_INFINITY {
        dst.extend_from_slice(b"\"-Inf\"");
    } else {
        append_finite_float(dst, value, width);
    }
}

/// Append a float as bare text, spelling out NaN and the infinities
///
/// Used inside already-quoted values such as complex numbers.
pub fn append_float_text(dst: &mut Vec<u8>, value: f64, width: FloatWidth) {
    if value.is_nan() {
        dst.extend_from_slice(b"NaN");
    } else if value == f64::INFINITY {
        dst.extend_from_slice(b"+Inf");
    } else if value == f64::NEG_INFINITY {
        dst.extend_from_slice(b"-Inf");
    } else {
        append_finite_float(dst, value, width);
    }
}

// `Display` for floats is the shortest round-trip form and never uses
// exponent notation.
fn append_finite_float(dst: &mut Vec<u8>, value: f64, width: FloatWidth) {
    let _ = match width {
        FloatWidth::F32 => write!(dst, "{}", value as f32),
        FloatWidth::F64 => write!(dst, "{}", value),
    };
}

/// Append `.ddd` for a fraction of `digits` decimal places, trailing zeros
/// removed. Nothing is appended for a zero fraction.
fn append_fraction(dst: &mut Vec<u8>, mut frac: u64, digits: usize) {
    if frac == 0 {
        return;
    }

    let mut buf = [b'0'; 9];
    let digits = digits.min(buf.len());
    for slot in buf[..digits].iter_mut().rev() {
        *slot = b'0' + (frac % 10) as u8;
        frac /= 10;
    }

    let mut end = digits;
    while end > 0 && buf[end - 1] == b'0' {
        end -= 1;
    }

    dst.push(b'.');
    dst.extend_from_slice(&buf[..end]);
}

/// Append seconds since the epoch with the sub-second part as a decimal
/// fraction, e.g. `1638645867.123456789`, `0.999` or `0`.
pub fn append_unix_decimal(dst: &mut Vec<u8>, secs: i64, nanos: u32) {
    let nanos = u64::from(nanos).min(NANOS_PER_SEC - 1);

    if secs < 0 && nanos > 0 {
        // floor(secs) + nanos is a negative value closer to zero
        dst.push(b'-');
        append_u64(dst, (secs + 1).unsigned_abs());
        append_fraction(dst, NANOS_PER_SEC - nanos, 9);
        return;
    }

    append_i64(dst, secs);
    append_fraction(dst, nanos, 9);
}

/// Append a timestamp according to `format`
///
/// Numeric formats produce unquoted JSON numbers; every other format
/// produces a quoted JSON string.
pub fn append_time(dst: &mut Vec<u8>, t: &DateTime<FixedOffset>, format: &TimestampFormat) {
    match format {
        TimestampFormat::UnixDecimal => {
            append_unix_decimal(dst, t.timestamp(), t.timestamp_subsec_nanos())
        }
        TimestampFormat::Unix => append_i64(dst, t.timestamp()),
        TimestampFormat::UnixMillis => append_i64(dst, t.timestamp_millis()),
        TimestampFormat::UnixMicros => append_i64(dst, t.timestamp_micros()),
        TimestampFormat::Rfc3339Nano => append_rfc3339(dst, t, true),
        TimestampFormat::Rfc3339 => append_rfc3339(dst, t, false),
        TimestampFormat::Iso8601 => {
            dst.push(b'"');
            let _ = write!(
                dst,
                "{}",
                t.with_timezone(&Utc).format("%Y-%m-%dT%H:%M:%S%.3fZ")
            );
            dst.push(b'"');
        }
        TimestampFormat::Custom(layout) => append_layout(dst, t, layout),
    }
}

fn append_rfc3339(dst: &mut Vec<u8>, t: &DateTime<FixedOffset>, with_nanos: bool) {
    dst.push(b'"');
    let _ = write!(dst, "{}", t.format("%Y-%m-%dT%H:%M:%S"));

    if with_nanos {
        let nanos = u64::from(t.timestamp_subsec_nanos()).min(NANOS_PER_SEC - 1);
        append_fraction(dst, nanos, 9);
    }

    let offset = t.offset().local_minus_utc();
    if offset == 0 {
        dst.push(b'Z');
    } else {
        let sign = if offset < 0 { '-' } else { '+' };
        let minutes = offset.unsigned_abs() / 60;
        let _ = write!(dst, "{}{:02}:{:02}", sign, minutes / 60, minutes % 60);
    }
    dst.push(b'"');
}

fn append_layout(dst: &mut Vec<u8>, t: &DateTime<FixedOffset>, layout: &str) {
    let mut rendered = String::new();

    if write!(rendered, "{}", t.format(layout)).is_ok() {
        append_quoted(dst, &rendered);
    } else {
        dst.extend_from_slice(b"\"ERROR: INVALID TIME FORMAT: ");
        append_escaped(dst, layout);
        dst.push(b'"');
    }
}

/// Reduce a path to its last two segments (`directory/file`)
///
/// Paths with fewer than two separators are returned unchanged.
pub fn short_path(path: &str) -> &str {
    let is_separator = |c: char| c == '/' || c == '\\';

    let Some(idx) = path.rfind(is_separator) else {
        return path;
    };

    match path[..idx].rfind(is_separator) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Append `file:line` for a caller (no surrounding quotes)
///
/// A missing caller renders as `:0`.
pub fn append_caller(dst: &mut Vec<u8>, caller: Option<(&str, u32)>, short: bool) {
    match caller {
        Some((file, line)) => {
            let file = if short { short_path(file) } else { file };
            append_escaped(dst, file);
            dst.push(b':');
            append_u64(dst, u64::from(line));
        }
        None => dst.extend_from_slice(b":0"),
    }
}

/// Append a signed nanosecond count as a human-readable duration
///
/// Durations of a second or more use `h`, `m` and `s` components
/// (`1h1m1.001001001s`, `2m0s`), shorter ones a single unit (`1.5ms`,
/// `250µs`, `3ns`). Zero is `0s`.
pub fn append_duration(dst: &mut Vec<u8>, nanos: i64) {
    if nanos == 0 {
        dst.extend_from_slice(b"0s");
        return;
    }
    if nanos < 0 {
        dst.push(b'-');
    }

    let total = nanos.unsigned_abs();

    if total < NANOS_PER_SEC {
        let (digits, unit): (u32, &[u8]) = if total < 1_000 {
            (0, b"ns")
        } else if total < 1_000_000 {
            (3, "µs".as_bytes())
        } else {
            (6, b"ms")
        };
        let scale = 10u64.pow(digits);

        append_u64(dst, total / scale);
        append_fraction(dst, total % scale, digits as usize);
        dst.extend_from_slice(unit);
        return;
    }

    let secs = total / NANOS_PER_SEC;
    let hours = secs / 3600;
    let minutes = secs / 60 % 60;

    if hours > 0 {
        append_u64(dst, hours);
        dst.push(b'h');
    }
    if hours > 0 || minutes > 0 {
        append_u64(dst, minutes);
        dst.push(b'm');
    }
    append_u64(dst, secs % 60);
    append_fraction(dst, total % NANOS_PER_SEC, 9);
    dst.push(b's');
}
