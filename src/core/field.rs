//! Typed key/value fields and their JSON encoder
//!
//! A [`Field`] pairs a key with a [`FieldValue`], a closed sum type covering
//! every kind of value a record can carry. Nullable variants hold an
//! `Option` and render `null` when empty. Polymorphic values (`Display`,
//! `Debug`, `Error`, serde objects) are borrowed trait objects chosen when
//! the field is constructed.
//!
//! Encoding never fails: every value renders to exactly one JSON value.
//! Values that cannot be represented degrade to `null` or to a diagnostic
//! string.

use super::append::{
    append_duration, append_escaped, append_float, append_float_text, append_i64,
    append_quoted, append_time, append_u64, FloatWidth,
};
use super::logger::default_logger;
use super::severity::Severity;
use super::timestamp::{default_time_format, TimestampFormat};
use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone, Utc};
use std::borrow::Cow;
use std::error::Error;
use std::fmt::{self, Debug, Display, Write as _};
use std::panic::Location;
use std::time::SystemTime;

const ERROR_KEY: &str = "error";
const ERRORS_KEY: &str = "errors";
const ERROR_STACKTRACE_KEY: &str = "errorStacktrace";
const NULL: &[u8] = b"null";

/// Declared bit width of an integer value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
    /// Platform word size (`isize`/`usize`)
    Native,
}

/// Instant captured by a time field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeValue {
    pub secs: i64,
    pub nanos: u32,
    /// `None` renders in UTC
    pub offset: Option<FixedOffset>,
}

impl TimeValue {
    pub fn from_datetime<Tz: TimeZone>(value: &DateTime<Tz>) -> Self {
        let fixed = value.fixed_offset();
        Self {
            secs: fixed.timestamp(),
            nanos: fixed.timestamp_subsec_nanos(),
            offset: Some(*fixed.offset()),
        }
    }

    pub fn from_system_time(value: SystemTime) -> Self {
        let utc: DateTime<Utc> = value.into();
        Self {
            secs: utc.timestamp(),
            nanos: utc.timestamp_subsec_nanos(),
            offset: None,
        }
    }

    fn to_datetime(self) -> Option<DateTime<FixedOffset>> {
        let utc = Utc.timestamp_opt(self.secs, self.nanos).single()?;
        Some(match self.offset {
            Some(offset) => utc.with_timezone(&offset),
            None => utc.fixed_offset(),
        })
    }
}

/// Rendering source of an error-with-stacktrace field
#[derive(Clone, Copy)]
pub enum Stacktrace<'a> {
    /// Verbose `Debug` rendering, for error types that carry a backtrace
    Formatter(&'a dyn Debug),
    /// The error message followed by its `source()` chain
    Error(&'a dyn Error),
}

/// A value that can be marshalled by an external JSON encoder
///
/// Implemented for every `serde::Serialize` type.
pub trait ObjectValue {
    fn to_json(&self) -> serde_json::Result<Vec<u8>>;
}

impl<T: serde::Serialize + ?Sized> ObjectValue for T {
    fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

#[derive(Clone, Default)]
pub enum FieldValue<'a> {
    /// A field that was never given a value
    #[default]
    None,
    /// An unknown type code
    Undefined(u8),

    Bool(bool),
    BoolPtr(Option<bool>),
    Uint(u64, IntWidth),
    UintPtr(Option<u64>, IntWidth),
    Int(i64, IntWidth),
    IntPtr(Option<i64>, IntWidth),
    Float(f64, FloatWidth),
    FloatPtr(Option<f64>, FloatWidth),
    Complex {
        re: f64,
        im: f64,
        width: FloatWidth,
    },
    ComplexPtr(Option<(f64, f64)>, FloatWidth),

    Time(TimeValue, Option<TimestampFormat>),
    TimePtr(Option<TimeValue>, Option<TimestampFormat>),
    /// Nanoseconds divided by a unit in nanoseconds
    Duration {
        nanos: i64,
        unit: i64,
    },
    DurationPtr(Option<i64>, i64),
    /// Nanoseconds rendered as a human-readable duration
    DurationFormat(i64),
    DurationFormatPtr(Option<i64>),

    String(Cow<'a, str>),
    StringPtr(Option<&'a str>),
    Strings(Option<Vec<&'a str>>),

    Stringer(Option<&'a dyn Display>),
    Formatter(Option<&'a dyn Debug>),
    Error(Option<&'a dyn Error>),
    Errors(Option<Vec<&'a dyn Error>>),
    ErrorStacktrace(Option<Stacktrace<'a>>),
    Interface(Option<&'a dyn Debug>),
    /// Serialized by the marshal function; the location blames the
    /// construction site if marshalling fails
    Object(&'a dyn ObjectValue, &'static Location<'static>),
}

impl FieldValue<'_> {
    /// Short name of the variant, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::None => "none",
            FieldValue::Undefined(_) => "undefined",
            FieldValue::Bool(_) => "bool",
            FieldValue::BoolPtr(_) => "bool_opt",
            FieldValue::Uint(..) => "uint",
            FieldValue::UintPtr(..) => "uint_opt",
            FieldValue::Int(..) => "int",
            FieldValue::IntPtr(..) => "int_opt",
            FieldValue::Float(..) => "float",
            FieldValue::FloatPtr(..) => "float_opt",
            FieldValue::Complex { .. } => "complex",
            FieldValue::ComplexPtr(..) => "complex_opt",
            FieldValue::Time(..) => "time",
            FieldValue::TimePtr(..) => "time_opt",
            FieldValue::Duration { .. } => "duration",
            FieldValue::DurationPtr(..) => "duration_opt",
            FieldValue::DurationFormat(_) => "duration_format",
            FieldValue::DurationFormatPtr(_) => "duration_format_opt",
            FieldValue::String(_) => "string",
            FieldValue::StringPtr(_) => "string_opt",
            FieldValue::Strings(_) => "strings",
            FieldValue::Stringer(_) => "stringer",
            FieldValue::Formatter(_) => "formatter",
            FieldValue::Error(_) => "error",
            FieldValue::Errors(_) => "errors",
            FieldValue::ErrorStacktrace(_) => "error_stacktrace",
            FieldValue::Interface(_) => "interface",
            FieldValue::Object(..) => "object",
        }
    }
}

/// One typed key/value pair of a record
#[derive(Clone, Default)]
pub struct Field<'a> {
    pub key: Cow<'a, str>,
    pub value: FieldValue<'a>,
}

impl Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("key", &self.key)
            .field("kind", &self.value.kind())
            .finish()
    }
}

macro_rules! int_constructors {
    ($($name:ident, $opt:ident, $ty:ty, $variant:ident, $ptr:ident, $wide:ty, $width:ident;)*) => {
        $(
            pub fn $name(key: impl Into<Cow<'a, str>>, value: $ty) -> Self {
                Self::new(key, FieldValue::$variant(value as $wide, IntWidth::$width))
            }

            pub fn $opt(key: impl Into<Cow<'a, str>>, value: Option<$ty>) -> Self {
                Self::new(key, FieldValue::$ptr(value.map(|v| v as $wide), IntWidth::$width))
            }
        )*
    };
}

impl<'a> Field<'a> {
    pub fn new(key: impl Into<Cow<'a, str>>, value: FieldValue<'a>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn bool(key: impl Into<Cow<'a, str>>, value: bool) -> Self {
        Self::new(key, FieldValue::Bool(value))
    }

    pub fn bool_opt(key: impl Into<Cow<'a, str>>, value: Option<bool>) -> Self {
        Self::new(key, FieldValue::BoolPtr(value))
    }

    int_constructors! {
        uint, uint_opt, usize, Uint, UintPtr, u64, Native;
        u8, u8_opt, u8, Uint, UintPtr, u64, W8;
        u16, u16_opt, u16, Uint, UintPtr, u64, W16;
        u32, u32_opt, u32, Uint, UintPtr, u64, W32;
        u64, u64_opt, u64, Uint, UintPtr, u64, W64;
        int, int_opt, isize, Int, IntPtr, i64, Native;
        i8, i8_opt, i8, Int, IntPtr, i64, W8;
        i16, i16_opt, i16, Int, IntPtr, i64, W16;
        i32, i32_opt, i32, Int, IntPtr, i64, W32;
        i64, i64_opt, i64, Int, IntPtr, i64, W64;
    }

    pub fn f32(key: impl Into<Cow<'a, str>>, value: f32) -> Self {
        Self::new(key, FieldValue::Float(f64::from(value), FloatWidth::F32))
    }

    pub fn f32_opt(key: impl Into<Cow<'a, str>>, value: Option<f32>) -> Self {
        Self::new(key, FieldValue::FloatPtr(value.map(f64::from), FloatWidth::F32))
    }

    pub fn f64(key: impl Into<Cow<'a, str>>, value: f64) -> Self {
        Self::new(key, FieldValue::Float(value, FloatWidth::F64))
    }

    pub fn f64_opt(key: impl Into<Cow<'a, str>>, value: Option<f64>) -> Self {
        Self::new(key, FieldValue::FloatPtr(value, FloatWidth::F64))
    }

    /// Complex number with 32-bit components, rendered as `"<re>+<im>i"`
    pub fn complex64(key: impl Into<Cow<'a, str>>, re: f32, im: f32) -> Self {
        Self::new(
            key,
            FieldValue::Complex {
                re: f64::from(re),
                im: f64::from(im),
                width: FloatWidth::F32,
            },
        )
    }

    pub fn complex64_opt(key: impl Into<Cow<'a, str>>, value: Option<(f32, f32)>) -> Self {
        Self::new(
            key,
            FieldValue::ComplexPtr(
                value.map(|(re, im)| (f64::from(re), f64::from(im))),
                FloatWidth::F32,
            ),
        )
    }

    pub fn complex128(key: impl Into<Cow<'a, str>>, re: f64, im: f64) -> Self {
        Self::new(
            key,
            FieldValue::Complex {
                re,
                im,
                width: FloatWidth::F64,
            },
        )
    }

    pub fn complex128_opt(key: impl Into<Cow<'a, str>>, value: Option<(f64, f64)>) -> Self {
        Self::new(key, FieldValue::ComplexPtr(value, FloatWidth::F64))
    }

    /// Time rendered with the process-wide default time format
    pub fn time<Tz: TimeZone>(key: impl Into<Cow<'a, str>>, value: &DateTime<Tz>) -> Self {
        Self::new(key, FieldValue::Time(TimeValue::from_datetime(value), None))
    }

    pub fn time_opt<Tz: TimeZone>(
        key: impl Into<Cow<'a, str>>,
        value: Option<&DateTime<Tz>>,
    ) -> Self {
        Self::new(
            key,
            FieldValue::TimePtr(value.map(TimeValue::from_datetime), None),
        )
    }

    /// Time rendered in UTC with the process-wide default time format
    pub fn system_time(key: impl Into<Cow<'a, str>>, value: SystemTime) -> Self {
        Self::new(
            key,
            FieldValue::Time(TimeValue::from_system_time(value), None),
        )
    }

    /// Time rendered with its own format (a keyword or a strftime layout)
    pub fn time_format<Tz: TimeZone>(
        key: impl Into<Cow<'a, str>>,
        format: impl Into<TimestampFormat>,
        value: &DateTime<Tz>,
    ) -> Self {
        Self::new(
            key,
            FieldValue::Time(TimeValue::from_datetime(value), Some(format.into())),
        )
    }

    pub fn time_format_opt<Tz: TimeZone>(
        key: impl Into<Cow<'a, str>>,
        format: impl Into<TimestampFormat>,
        value: Option<&DateTime<Tz>>,
    ) -> Self {
        Self::new(
            key,
            FieldValue::TimePtr(value.map(TimeValue::from_datetime), Some(format.into())),
        )
    }

    /// Duration as an integer count of `unit`
    ///
    /// `Field::duration("elapsed", TimeDelta::milliseconds(1), d)` renders
    /// `d` in whole milliseconds.
    pub fn duration(key: impl Into<Cow<'a, str>>, unit: TimeDelta, value: TimeDelta) -> Self {
        Self::new(
            key,
            FieldValue::Duration {
                nanos: saturating_nanos(value),
                unit: saturating_nanos(unit),
            },
        )
    }

    pub fn duration_opt(
        key: impl Into<Cow<'a, str>>,
        unit: TimeDelta,
        value: Option<TimeDelta>,
    ) -> Self {
        Self::new(
            key,
            FieldValue::DurationPtr(value.map(saturating_nanos), saturating_nanos(unit)),
        )
    }

    /// Duration as a human-readable string such as `1h1m1.5s`
    pub fn duration_format(key: impl Into<Cow<'a, str>>, value: TimeDelta) -> Self {
        Self::new(key, FieldValue::DurationFormat(saturating_nanos(value)))
    }

    pub fn duration_format_opt(key: impl Into<Cow<'a, str>>, value: Option<TimeDelta>) -> Self {
        Self::new(
            key,
            FieldValue::DurationFormatPtr(value.map(saturating_nanos)),
        )
    }

    pub fn string(key: impl Into<Cow<'a, str>>, value: impl Into<Cow<'a, str>>) -> Self {
        Self::new(key, FieldValue::String(value.into()))
    }

    pub fn string_opt(key: impl Into<Cow<'a, str>>, value: Option<&'a str>) -> Self {
        Self::new(key, FieldValue::StringPtr(value))
    }

    /// String array; `None` renders `null`, an empty slice `[]`
    pub fn strings<S: AsRef<str>>(key: impl Into<Cow<'a, str>>, values: Option<&'a [S]>) -> Self {
        Self::new(
            key,
            FieldValue::Strings(values.map(|values| values.iter().map(AsRef::as_ref).collect())),
        )
    }

    /// String field built from format arguments
    ///
    /// ```
    /// use rec_logger::core::Field;
    ///
    /// let id = 42;
    /// let field = Field::sprintf("request", format_args!("req-{:05}", id));
    /// assert_eq!(field.to_json_string(), r#""request":"req-00042""#);
    /// ```
    pub fn sprintf(key: impl Into<Cow<'a, str>>, args: fmt::Arguments<'_>) -> Self {
        Self::new(key, FieldValue::String(Cow::Owned(fmt::format(args))))
    }

    pub fn stringer(key: impl Into<Cow<'a, str>>, value: Option<&'a dyn Display>) -> Self {
        Self::new(key, FieldValue::Stringer(value))
    }

    pub fn formatter(key: impl Into<Cow<'a, str>>, value: Option<&'a dyn Debug>) -> Self {
        Self::new(key, FieldValue::Formatter(value))
    }

    /// Error message under the key `error`
    pub fn error(err: Option<&'a dyn Error>) -> Self {
        Self::error_with_key(ERROR_KEY, err)
    }

    pub fn error_with_key(key: impl Into<Cow<'a, str>>, err: Option<&'a dyn Error>) -> Self {
        Self::new(key, FieldValue::Error(err))
    }

    /// Error messages under the key `errors`
    pub fn errors(errs: Option<&[&'a dyn Error]>) -> Self {
        Self::errors_with_key(ERRORS_KEY, errs)
    }

    pub fn errors_with_key(key: impl Into<Cow<'a, str>>, errs: Option<&[&'a dyn Error]>) -> Self {
        Self::new(key, FieldValue::Errors(errs.map(<[_]>::to_vec)))
    }

    /// Error message and source chain under the key `errorStacktrace`
    pub fn error_stacktrace(err: Option<&'a dyn Error>) -> Self {
        Self::error_stacktrace_with_key(ERROR_STACKTRACE_KEY, err)
    }

    pub fn error_stacktrace_with_key(
        key: impl Into<Cow<'a, str>>,
        err: Option<&'a dyn Error>,
    ) -> Self {
        Self::new(key, FieldValue::ErrorStacktrace(err.map(Stacktrace::Error)))
    }

    /// Verbose `Debug` rendering under the key `errorStacktrace`
    ///
    /// For error types whose `Debug` output carries a backtrace.
    pub fn error_stacktrace_verbose(err: Option<&'a dyn Debug>) -> Self {
        Self::new(
            ERROR_STACKTRACE_KEY,
            FieldValue::ErrorStacktrace(err.map(Stacktrace::Formatter)),
        )
    }

    /// Any value, rendered with `{:?}`
    ///
    /// String-like values keep their `Debug` quotes (`"\"s\""`); use
    /// [`Field::stringer`] to render them as plain text.
    pub fn interface(key: impl Into<Cow<'a, str>>, value: Option<&'a dyn Debug>) -> Self {
        Self::new(key, FieldValue::Interface(value))
    }

    /// Arbitrary serde value, embedded as its JSON serialization
    ///
    /// If serialization fails the field renders `null` and an ERROR record
    /// attributed to this call site is written through the default logger.
    #[track_caller]
    pub fn object<T: ObjectValue>(key: impl Into<Cow<'a, str>>, value: &'a T) -> Self {
        Self::new(key, FieldValue::Object(value, Location::caller()))
    }

    /// Render as a `"key":value` JSON fragment
    pub fn to_json_string(&self) -> String {
        let mut buf = Vec::new();
        append_json_field(&mut buf, self);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

fn saturating_nanos(value: TimeDelta) -> i64 {
    value.num_nanoseconds().unwrap_or(if value < TimeDelta::zero() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// `fmt::Write` sink that JSON-escapes into a byte buffer
struct EscapedWriter<'b>(&'b mut Vec<u8>);

impl fmt::Write for EscapedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        append_escaped(self.0, s);
        Ok(())
    }
}

fn append_quoted_display<T: Display + ?Sized>(dst: &mut Vec<u8>, value: &T) {
    dst.push(b'"');
    let _ = write!(EscapedWriter(dst), "{}", value);
    dst.push(b'"');
}

fn append_quoted_debug<T: Debug + ?Sized>(dst: &mut Vec<u8>, value: &T) {
    dst.push(b'"');
    let _ = write!(EscapedWriter(dst), "{:?}", value);
    dst.push(b'"');
}

fn append_error_chain(dst: &mut Vec<u8>, err: &dyn Error) {
    dst.push(b'"');
    let mut writer = EscapedWriter(dst);
    let _ = write!(writer, "{}", err);

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(writer, "\ncaused by: {}", cause);
        source = cause.source();
    }
    dst.push(b'"');
}

fn append_array<T>(dst: &mut Vec<u8>, items: &[T], mut each: impl FnMut(&mut Vec<u8>, &T)) {
    dst.push(b'[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            dst.push(b',');
        }
        each(dst, item);
    }
    dst.push(b']');
}

fn append_complex(dst: &mut Vec<u8>, re: f64, im: f64, width: FloatWidth) {
    dst.push(b'"');
    append_float_text(dst, re, width);
    if im >= 0.0 && im != f64::INFINITY {
        dst.push(b'+');
    }
    append_float_text(dst, im, width);
    dst.extend_from_slice(b"i\"");
}

fn append_time_value(dst: &mut Vec<u8>, value: TimeValue, format: Option<&TimestampFormat>) {
    let Some(datetime) = value.to_datetime() else {
        dst.extend_from_slice(NULL);
        return;
    };

    match format {
        Some(format) => append_time(dst, &datetime, format),
        None => append_time(dst, &datetime, &default_time_format()),
    }
}

fn append_duration_value(dst: &mut Vec<u8>, nanos: i64, unit: i64) {
    match nanos.checked_div(unit) {
        Some(count) => append_i64(dst, count),
        None => dst.extend_from_slice(NULL),
    }
}

fn append_or_null<T>(dst: &mut Vec<u8>, value: Option<T>, append: impl FnOnce(&mut Vec<u8>, T)) {
    match value {
        Some(value) => append(dst, value),
        None => dst.extend_from_slice(NULL),
    }
}

/// Append `"key":value` for a field
pub fn append_json_field(dst: &mut Vec<u8>, field: &Field<'_>) {
    append_quoted(dst, &field.key);
    dst.push(b':');
    append_field_value(dst, &field.value);
}

/// Append the JSON value of a field, marshalling objects with `serde_json`
pub fn append_field_value(dst: &mut Vec<u8>, value: &FieldValue<'_>) {
    append_field_value_with(dst, value, |object| object.to_json());
}

/// Append the JSON value of a field, marshalling objects with `marshal`
///
/// The bytes returned by `marshal` are appended verbatim.
pub fn append_field_value_with<M>(dst: &mut Vec<u8>, value: &FieldValue<'_>, marshal: M)
where
    M: Fn(&dyn ObjectValue) -> serde_json::Result<Vec<u8>>,
{
    match value {
        FieldValue::None => dst.extend_from_slice(b"\"ERROR: TYPE NONE\""),
        FieldValue::Undefined(code) => {
            dst.extend_from_slice(b"\"ERROR: UNDEFINED TYPE: ");
            append_u64(dst, u64::from(*code));
            dst.push(b'"');
        }

        FieldValue::Bool(v) => dst.extend_from_slice(if *v { b"true" } else { b"false" }),
        FieldValue::BoolPtr(v) => append_or_null(dst, *v, |dst, v| {
            dst.extend_from_slice(if v { b"true" } else { b"false" })
        }),
        FieldValue::Uint(v, _) => append_u64(dst, *v),
        FieldValue::UintPtr(v, _) => append_or_null(dst, *v, append_u64),
        FieldValue::Int(v, _) => append_i64(dst, *v),
        FieldValue::IntPtr(v, _) => append_or_null(dst, *v, append_i64),
        FieldValue::Float(v, width) => append_float(dst, *v, *width),
        FieldValue::FloatPtr(v, width) => {
            append_or_null(dst, *v, |dst, v| append_float(dst, v, *width))
        }
        FieldValue::Complex { re, im, width } => append_complex(dst, *re, *im, *width),
        FieldValue::ComplexPtr(v, width) => append_or_null(dst, *v, |dst, (re, im)| {
            append_complex(dst, re, im, *width)
        }),

        FieldValue::Time(v, format) => append_time_value(dst, *v, format.as_ref()),
        FieldValue::TimePtr(v, format) => append_or_null(dst, *v, |dst, v| {
            append_time_value(dst, v, format.as_ref())
        }),
        FieldValue::Duration { nanos, unit } => append_duration_value(dst, *nanos, *unit),
        FieldValue::DurationPtr(v, unit) => append_or_null(dst, *v, |dst, nanos| {
            append_duration_value(dst, nanos, *unit)
        }),
        FieldValue::DurationFormat(nanos) => {
            dst.push(b'"');
            append_duration(dst, *nanos);
            dst.push(b'"');
        }
        FieldValue::DurationFormatPtr(v) => append_or_null(dst, *v, |dst, nanos| {
            dst.push(b'"');
            append_duration(dst, nanos);
            dst.push(b'"');
        }),

        FieldValue::String(v) => append_quoted(dst, v),
        FieldValue::StringPtr(v) => append_or_null(dst, *v, append_quoted),
        FieldValue::Strings(v) => append_or_null(dst, v.as_deref(), |dst, values| {
            append_array(dst, values, |dst, s| append_quoted(dst, s))
        }),

        FieldValue::Stringer(v) => append_or_null(dst, *v, |dst, v| append_quoted_display(dst, v)),
        FieldValue::Formatter(v) => append_or_null(dst, *v, |dst, v| append_quoted_debug(dst, v)),
        FieldValue::Error(v) => append_or_null(dst, *v, |dst, err| append_quoted_display(dst, err)),
        FieldValue::Errors(v) => append_or_null(dst, v.as_deref(), |dst, errs| {
            append_array(dst, errs, |dst, err| append_quoted_display(dst, *err))
        }),
        FieldValue::ErrorStacktrace(v) => append_or_null(dst, *v, |dst, trace| match trace {
            Stacktrace::Formatter(value) => append_quoted_debug(dst, value),
            Stacktrace::Error(err) => append_error_chain(dst, err),
        }),
        FieldValue::Interface(v) => append_or_null(dst, *v, |dst, v| append_quoted_debug(dst, v)),
        FieldValue::Object(object, location) => match marshal(*object) {
            Ok(bytes) => dst.extend_from_slice(&bytes),
            Err(err) => {
                report_marshal_failure(&err, location);
                dst.extend_from_slice(NULL);
            }
        },
    }
}

fn report_marshal_failure(err: &serde_json::Error, location: &'static Location<'static>) {
    let message = format!("rec_logger::Field::object: serde_json: {}", err);
    default_logger().log_at(
        Some(location),
        Severity::ERROR,
        &message,
        &[],
        &[Field::error(Some(err))],
    );
}
