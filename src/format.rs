//! SQL-literal rendering of parameter values.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDateTime, Utc};
use compact_str::{CompactString, ToCompactString};

use crate::value::{AnyValue, Value, ValueKind};

/// Default time pattern, millisecond precision.
pub const TIME_FORMAT_MILLIS: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Literal emitted for the zero (epoch-sentinel) time.
pub const ZERO_TIME_LITERAL: &str = "0000-00-00 00:00:00";

/// Literal emitted for absent values, always unescaped.
pub const NULL_LITERAL: &str = "NULL";

/// Literal emitted for non-printable byte sequences.
pub const BINARY_LITERAL: &str = "<binary>";

const CONVERTIBLE_DEFAULT: &[ValueKind] = &[ValueKind::Time, ValueKind::Bool, ValueKind::Bytes];

/// Formats one parameter value into SQL-literal text with the given escape
/// token.
///
/// The capability the substitutor is polymorphic over; implement it to
/// inject a custom formatter into [`explain_with`](crate::explain_with).
pub trait ParamFormat {
    fn format_param(&self, value: &Value<'_>, escaper: &str) -> CompactString;
}

/// The default [`ParamFormat`] implementation.
///
/// Configuration is immutable once built and safe to share across threads;
/// build one at startup (or use [`ParamFormatter::DEFAULT`]) and reuse it.
#[derive(Debug, Clone)]
pub struct ParamFormatter {
    time_format: Cow<'static, str>,
    /// Rendered in place of the zero time when set; `None` formats the zero
    /// time through `time_format` like any other value.
    zero_time_literal: Option<Cow<'static, str>>,
    null_literal: Cow<'static, str>,
    convertible: Cow<'static, [ValueKind]>,
}

impl ParamFormatter {
    /// Process-wide default configuration.
    pub const DEFAULT: Self = Self {
        time_format: Cow::Borrowed(TIME_FORMAT_MILLIS),
        zero_time_literal: Some(Cow::Borrowed(ZERO_TIME_LITERAL)),
        null_literal: Cow::Borrowed(NULL_LITERAL),
        convertible: Cow::Borrowed(CONVERTIBLE_DEFAULT),
    };

    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Sets the `chrono` pattern used for time values.
    pub fn with_time_format(mut self, format: impl Into<Cow<'static, str>>) -> Self {
        self.time_format = format.into();
        self
    }

    /// Sets the literal emitted for the zero time, or `None` to format the
    /// zero time through the time pattern.
    pub fn with_zero_time_literal(mut self, literal: Option<Cow<'static, str>>) -> Self {
        self.zero_time_literal = literal;
        self
    }

    /// Sets the literal emitted for absent values.
    pub fn with_null_literal(mut self, literal: impl Into<Cow<'static, str>>) -> Self {
        self.null_literal = literal.into();
        self
    }

    /// Sets the kinds fallback values are probed against before generic
    /// rendering.
    pub fn with_convertible(mut self, kinds: impl Into<Cow<'static, [ValueKind]>>) -> Self {
        self.convertible = kinds.into();
        self
    }

    fn format_time(&self, time: NaiveDateTime, escaper: &str) -> CompactString {
        if time == NaiveDateTime::default()
            && let Some(zero) = &self.zero_time_literal
        {
            return self.escape_str(zero, escaper);
        }
        self.escape_str(&time.format(&self.time_format).to_string(), escaper)
    }

    fn format_null(&self) -> CompactString {
        self.null_literal.to_compact_string()
    }

    /// Probes the configured convertible kinds, then degrades to generic
    /// `Debug` text.
    fn format_fallback(&self, value: &dyn AnyValue, escaper: &str) -> CompactString {
        let any = value.as_any();
        for kind in self.convertible.iter() {
            match kind {
                ValueKind::Time => {
                    if let Some(t) = any.downcast_ref::<NaiveDateTime>() {
                        return self.format_time(*t, escaper);
                    }
                    if let Some(t) = any.downcast_ref::<DateTime<Utc>>() {
                        return self.format_time(t.naive_utc(), escaper);
                    }
                }
                ValueKind::Bool => {
                    if let Some(b) = any.downcast_ref::<bool>() {
                        return self.format_param(&Value::Bool(*b), escaper);
                    }
                }
                ValueKind::Bytes => {
                    if let Some(b) = any.downcast_ref::<Vec<u8>>() {
                        return self.format_param(&Value::bytes(b), escaper);
                    }
                }
            }
        }
        self.escape_str(&format!("{value:?}"), escaper)
    }

    /// Escapes embedded escape tokens with a backslash, then wraps.
    fn escape_str(&self, text: &str, escaper: &str) -> CompactString {
        if escaper.is_empty() || !text.contains(escaper) {
            return self.escape(text, escaper);
        }
        let escaped = text.replace(escaper, &format!("\\{escaper}"));
        self.escape(&escaped, escaper)
    }

    /// Wraps text with the escape token on both sides.
    fn escape(&self, text: &str, escaper: &str) -> CompactString {
        let mut out = CompactString::with_capacity(text.len() + 2 * escaper.len());
        out.push_str(escaper);
        out.push_str(text);
        out.push_str(escaper);
        out
    }
}

impl Default for ParamFormatter {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ParamFormat for ParamFormatter {
    fn format_param(&self, value: &Value<'_>, escaper: &str) -> CompactString {
        match value {
            Value::Bool(b) => b.to_compact_string(),
            Value::Time(t) => self.format_time(*t, escaper),
            Value::NullableTime(None) => self.format_null(),
            Value::NullableTime(Some(t)) => self.format_time(*t, escaper),
            Value::Driver(v) => match v.driver_value() {
                Ok(Some(inner)) => self.format_param(&inner, escaper),
                // Absent and failed accessors both degrade to the null
                // literal; errors are not propagated.
                Ok(None) | Err(_) => self.format_null(),
            },
            Value::Display(v) => self.escape_str(&v.to_string(), escaper),
            Value::Bytes(b) => match std::str::from_utf8(b) {
                Ok(s) if is_printable(s) => self.escape_str(s, escaper),
                _ => self.escape(BINARY_LITERAL, escaper),
            },
            Value::Int(i) => i.to_compact_string(),
            Value::UInt(u) => u.to_compact_string(),
            // Shortest round-trip text at the value's own precision.
            Value::Float32(v) => v.to_compact_string(),
            Value::Float64(v) => v.to_compact_string(),
            Value::Text(s) => self.escape_str(s, escaper),
            Value::Null => self.format_null(),
            Value::Other(v) => self.format_fallback(*v, escaper),
        }
    }
}

pub(crate) fn is_printable(text: &str) -> bool {
    text.chars().all(|c| !c.is_control())
}
