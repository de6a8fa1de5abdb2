//! Single-pass JSON record assembly
//!
//! Block order is fixed: timestamp, severity, hostname, caller, message,
//! then the logger's context fields, then the call's fields. Every block is
//! written as `"key":value,` and the final comma is replaced by `}`.

use super::append::{append_caller, append_escaped, append_time};
use super::caller::Caller;
use super::config::Config;
use super::field::{append_json_field, Field};
use chrono::{DateTime, FixedOffset};

/// Per-call inputs of one record
#[derive(Debug, Clone, Copy)]
pub struct Record<'r> {
    pub time: &'r DateTime<FixedOffset>,
    /// Display name already resolved for the configured case
    pub severity_name: &'r str,
    pub caller: Option<&'r Caller>,
    pub message: &'r str,
}

fn append_key(dst: &mut Vec<u8>, key: &str) {
    dst.push(b'"');
    append_escaped(dst, key);
    dst.extend_from_slice(b"\":");
}

/// Append one complete record, line separator included
///
/// `context_fields` is a pre-rendered sequence of comma-terminated
/// `"key":value,` fragments. `leading` fields are written before `fields`.
pub fn assemble(
    dst: &mut Vec<u8>,
    config: &Config,
    record: &Record<'_>,
    context_fields: &[u8],
    leading: &[Field<'_>],
    fields: &[Field<'_>],
) {
    dst.push(b'{');

    if config.use_timestamp_field {
        append_key(dst, &config.timestamp_field_key);
        append_time(dst, record.time, &config.timestamp_field_format);
        dst.push(b',');
    }

    if config.use_severity_field {
        append_key(dst, &config.severity_field_key);
        dst.push(b'"');
        append_escaped(dst, record.severity_name);
        dst.extend_from_slice(b"\",");
    }

    if config.use_hostname_field {
        append_key(dst, &config.hostname_field_key);
        dst.push(b'"');
        append_escaped(dst, &config.hostname_field_value);
        dst.extend_from_slice(b"\",");
    }

    if config.use_caller_field {
        append_key(dst, &config.caller_field_key);
        dst.push(b'"');
        append_caller(
            dst,
            record.caller.map(|caller| (caller.file(), caller.line())),
            config.use_short_caller,
        );
        dst.extend_from_slice(b"\",");
    }

    if config.use_message_field {
        append_key(dst, &config.message_field_key);
        dst.push(b'"');
        append_escaped(dst, record.message);
        dst.extend_from_slice(b"\",");
    }

    dst.extend_from_slice(context_fields);

    for field in leading.iter().chain(fields) {
        append_json_field(dst, field);
        dst.push(b',');
    }

    match dst.last_mut() {
        Some(last) if *last == b',' => *last = b'}',
        _ => dst.push(b'}'),
    }

    dst.extend_from_slice(config.line_separator.as_bytes());
}

/// Render fields as comma-terminated fragments for a logger's context
pub fn append_context_fields(dst: &mut Vec<u8>, fields: &[Field<'_>]) {
    for field in fields {
        append_json_field(dst, field);
        dst.push(b',');
    }
}
