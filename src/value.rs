//! Parameter value model for SQL explain rendering.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::ExplainError;

/// A capability some parameter types expose to reveal a simpler canonical
/// representation for formatting (the equivalent of a database driver's
/// wrapped value).
///
/// `Ok(None)` means the value is absent and renders as the null literal.
/// Errors are discarded by the formatter, which then falls back to the null
/// literal as well.
pub trait DriverValue {
    fn driver_value(&self) -> Result<Option<Value<'_>>, ExplainError>;
}

/// Fallback capability for values outside the closed variant set: anything
/// that is `Any` (so the formatter can probe the configured convertible
/// kinds) and `Debug` (so it can always degrade to generic text).
pub trait AnyValue: fmt::Debug {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug> AnyValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Runtime kinds a fallback value may be implicitly converted to before
/// formatting, when no more specific rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Time,
    Bool,
    Bytes,
}

/// A bound SQL parameter value.
///
/// The variants form a closed set covering every dispatch class of the
/// formatter; variant order mirrors formatting priority, which matters for
/// values that could plausibly be expressed more than one way (a type with
/// both a [`DriverValue`] impl and a `Display` impl renders through
/// whichever variant the caller constructs).
#[derive(Clone, Default)]
pub enum Value<'a> {
    #[default]
    Null,
    Bool(bool),
    /// Time value (naive, as it appears in SQL text).
    Time(NaiveDateTime),
    /// Nullable time; `None` renders as the null literal.
    NullableTime(Option<NaiveDateTime>),
    /// A value revealing its canonical representation on demand.
    Driver(&'a dyn DriverValue),
    /// A value with a custom text rendering.
    Display(&'a dyn fmt::Display),
    Bytes(Cow<'a, [u8]>),
    Int(i64),
    UInt(u64),
    Float32(f32),
    Float64(f64),
    Text(Cow<'a, str>),
    /// Anything else; probed against the convertible kinds, then rendered
    /// via `Debug`.
    Other(&'a dyn AnyValue),
}

impl<'a> Value<'a> {
    /// Creates a text value from a borrowed string.
    pub const fn text(text: &'a str) -> Self {
        Value::Text(Cow::Borrowed(text))
    }

    /// Creates a byte-sequence value from a borrowed slice.
    pub const fn bytes(bytes: &'a [u8]) -> Self {
        Value::Bytes(Cow::Borrowed(bytes))
    }

    /// Creates a nullable time value.
    pub const fn nullable_time(time: Option<NaiveDateTime>) -> Self {
        Value::NullableTime(time)
    }

    /// Wraps a value exposing the driver-value capability.
    pub const fn driver(value: &'a dyn DriverValue) -> Self {
        Value::Driver(value)
    }

    /// Wraps a value with a custom text rendering.
    pub const fn display(value: &'a dyn fmt::Display) -> Self {
        Value::Display(value)
    }

    /// Wraps an arbitrary value for fallback formatting.
    pub const fn other(value: &'a dyn AnyValue) -> Self {
        Value::Other(value)
    }

    /// Returns true if this value renders as the null literal without
    /// consulting any capability.
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null | Value::NullableTime(None))
    }
}

macro_rules! impl_from_int {
    ($variant:ident as $target:ty => $($t:ty),+) => {$(
        impl<'a> From<$t> for Value<'a> {
            fn from(value: $t) -> Self {
                Value::$variant(value as $target)
            }
        }
    )+};
}

impl_from_int!(Int as i64 => i8, i16, i32, i64, isize);
impl_from_int!(UInt as u64 => u8, u16, u32, u64, usize);

impl<'a> From<bool> for Value<'a> {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl<'a> From<f32> for Value<'a> {
    fn from(value: f32) -> Self {
        Value::Float32(value)
    }
}

impl<'a> From<f64> for Value<'a> {
    fn from(value: f64) -> Self {
        Value::Float64(value)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(value: &'a str) -> Self {
        Value::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<String> for Value<'a> {
    fn from(value: String) -> Self {
        Value::Text(Cow::Owned(value))
    }
}

impl<'a> From<Cow<'a, str>> for Value<'a> {
    fn from(value: Cow<'a, str>) -> Self {
        Value::Text(value)
    }
}

impl<'a> From<&'a [u8]> for Value<'a> {
    fn from(value: &'a [u8]) -> Self {
        Value::Bytes(Cow::Borrowed(value))
    }
}

impl<'a> From<Vec<u8>> for Value<'a> {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(Cow::Owned(value))
    }
}

impl<'a> From<Cow<'a, [u8]>> for Value<'a> {
    fn from(value: Cow<'a, [u8]>) -> Self {
        Value::Bytes(value)
    }
}

impl<'a> From<NaiveDateTime> for Value<'a> {
    fn from(value: NaiveDateTime) -> Self {
        Value::Time(value)
    }
}

impl<'a> From<DateTime<Utc>> for Value<'a> {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Time(value.naive_utc())
    }
}

/// Absent values (dangling references, unset columns) render as the null
/// literal; present values go through their own variant.
impl<'a, T: Into<Value<'a>>> From<Option<T>> for Value<'a> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Time(t) => f.debug_tuple("Time").field(t).finish(),
            Value::NullableTime(t) => f.debug_tuple("NullableTime").field(t).finish(),
            Value::Driver(_) => f.debug_tuple("Driver").field(&"<dyn>").finish(),
            Value::Display(_) => f.debug_tuple("Display").field(&"<dyn>").finish(),
            Value::Bytes(b) => f.debug_tuple("Bytes").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::UInt(u) => f.debug_tuple("UInt").field(u).finish(),
            Value::Float32(v) => f.debug_tuple("Float32").field(v).finish(),
            Value::Float64(v) => f.debug_tuple("Float64").field(v).finish(),
            Value::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Value::Other(v) => f.debug_tuple("Other").field(v).finish(),
        }
    }
}

/// Raw rendering without escaping, for debug output. Use
/// [`ParamFormat`](crate::ParamFormat) for SQL-literal text.
impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null | Value::NullableTime(None) => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Time(t) | Value::NullableTime(Some(t)) => write!(f, "{t}"),
            Value::Driver(v) => match v.driver_value() {
                Ok(Some(inner)) => write!(f, "{inner}"),
                Ok(None) | Err(_) => Ok(()),
            },
            Value::Display(v) => write!(f, "{v}"),
            Value::Bytes(b) => write!(f, "{}", String::from_utf8_lossy(b)),
            Value::Int(i) => write!(f, "{i}"),
            Value::UInt(u) => write!(f, "{u}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Other(v) => write!(f, "{v:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_integer_widths() {
        assert!(matches!(Value::from(-3i8), Value::Int(-3)));
        assert!(matches!(Value::from(7i64), Value::Int(7)));
        assert!(matches!(Value::from(9u16), Value::UInt(9)));
        assert!(matches!(Value::from(42usize), Value::UInt(42)));
    }

    #[test]
    fn from_option_maps_none_to_null() {
        let absent: Option<&str> = None;
        assert!(Value::from(absent).is_null());
        assert!(matches!(Value::from(Some(5)), Value::Int(5)));
    }

    #[test]
    fn display_is_raw() {
        assert_eq!(Value::from("o'brien").to_string(), "o'brien");
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(1.5f64).to_string(), "1.5");
    }
}
