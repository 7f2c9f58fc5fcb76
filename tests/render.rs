//! End-to-end rendering scenarios across the value formatter and both
//! substitution modes.

use chrono::NaiveDate;
use regex::Regex;
use sql_explain::{ExplainError, ParamFormat, ParamFormatter, Value, explain, explain_with};

#[test]
fn positional_select() {
    let sql = explain(
        "SELECT * FROM t WHERE id = ? AND name = ?",
        None,
        "'",
        &[Value::from(5), Value::from("bob")],
    );
    assert_eq!(sql, "SELECT * FROM t WHERE id = 5 AND name = 'bob'");
}

#[test]
fn numbered_select() {
    let pattern = Regex::new(r"\$(\d+)\$").unwrap();
    let sql = explain("WHERE x = $1$", Some(&pattern), "'", &[Value::from("hi")]);
    assert_eq!(sql, "WHERE x = 'hi'");
}

#[test]
fn postgres_style_placeholders() {
    let pattern = Regex::new(r"\$(\d+)").unwrap();
    let sql = explain(
        "INSERT INTO users (name, age) VALUES ($1, $2)",
        Some(&pattern),
        "'",
        &[Value::from("ada"), Value::from(36)],
    );
    assert_eq!(sql, "INSERT INTO users (name, age) VALUES ('ada', 36)");
}

#[test]
fn mixed_value_types() {
    let when = NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap();
    let sql = explain(
        "UPDATE t SET active = ?, score = ?, seen_at = ?, blob = ? WHERE id = ?",
        None,
        "'",
        &[
            Value::from(false),
            Value::from(9.75f64),
            Value::from(when),
            Value::bytes(&[0x00, 0xde, 0xad]),
            Value::from(7u32),
        ],
    );
    assert_eq!(
        sql,
        "UPDATE t SET active = false, score = 9.75, seen_at = '2024-06-01 08:30:00.000', \
         blob = '<binary>' WHERE id = 7"
    );
}

#[test]
fn nil_values_render_null_unwrapped() {
    let absent: Option<i64> = None;
    let sql = explain(
        "WHERE a = ? AND b = ?",
        None,
        "'",
        &[Value::from(absent), Value::nullable_time(None)],
    );
    assert_eq!(sql, "WHERE a = NULL AND b = NULL");
}

#[test]
fn question_marks_survive_exhausted_values() {
    let sql = explain(
        "SELECT * FROM t WHERE a = ? AND b = ?",
        None,
        "'",
        &[Value::from(1)],
    );
    assert_eq!(sql, "SELECT * FROM t WHERE a = 1 AND b = ?");
}

struct Wrapped(&'static str);

impl sql_explain::DriverValue for Wrapped {
    fn driver_value(&self) -> Result<Option<Value<'_>>, ExplainError> {
        Ok(Some(Value::from(self.0)))
    }
}

#[test]
fn driver_values_unwrap_through_substitution() {
    let wrapped = Wrapped("inner");
    let sql = explain("x = ?", None, "'", &[Value::driver(&wrapped)]);
    assert_eq!(sql, "x = 'inner'");
}

/// A formatter that redacts every value, injected through the capability
/// trait.
struct Redacting;

impl ParamFormat for Redacting {
    fn format_param(
        &self,
        _value: &Value<'_>,
        escaper: &str,
    ) -> compact_str::CompactString {
        let mut out = compact_str::CompactString::new(escaper);
        out.push_str("?");
        out.push_str(escaper);
        out
    }
}

#[test]
fn injected_formatter_controls_rendering() {
    let sql = explain_with(
        &Redacting,
        "a = ? AND b = ?",
        None,
        "'",
        &[Value::from(1), Value::from("secret")],
    );
    assert_eq!(sql, "a = '?' AND b = '?'");
}

#[test]
fn custom_configuration_flows_through() {
    let formatter = ParamFormatter::new()
        .with_null_literal("nil")
        .with_time_format("%H:%M");
    let when = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(23, 59, 0)
        .unwrap();
    let sql = explain_with(
        &formatter,
        "t = ? AND n = ?",
        None,
        "'",
        &[Value::from(when), Value::Null],
    );
    assert_eq!(sql, "t = '23:59' AND n = nil");
}
