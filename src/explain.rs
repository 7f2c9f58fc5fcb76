//! Placeholder substitution over SQL templates.

use std::sync::LazyLock;

use compact_str::CompactString;
use regex::{Captures, Regex};
use smallvec::SmallVec;

use crate::explain_trace;
use crate::format::{ParamFormat, ParamFormatter};
use crate::value::Value;

/// Canonical numbered-token form every caller pattern is normalized to.
static NUMBERED_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\d+)\$").expect("canonical numbered token pattern"));

/// Renders a SQL template with its bound values substituted in, for logging.
///
/// With `numbered_placeholder` absent, each `?` is replaced left to right by
/// the next unused value; leftover `?` pass through once values run out.
/// With a pattern supplied, every match is replaced by the value at the
/// 1-based index captured by the pattern's first group (e.g. `\$(\d+)` for
/// Postgres-style `$1`); out-of-range indices leave the token in place.
///
/// The result is best-effort display text. It is never safe to execute:
/// substitution is purely textual and performs no injection protection.
///
/// ```
/// use sql_explain::{Value, explain};
///
/// let sql = explain(
///     "SELECT * FROM t WHERE id = ? AND name = ?",
///     None,
///     "'",
///     &[Value::from(5), Value::from("bob")],
/// );
/// assert_eq!(sql, "SELECT * FROM t WHERE id = 5 AND name = 'bob'");
/// ```
pub fn explain(
    sql: &str,
    numbered_placeholder: Option<&Regex>,
    escaper: &str,
    values: &[Value<'_>],
) -> String {
    explain_with(&ParamFormatter::DEFAULT, sql, numbered_placeholder, escaper, values)
}

/// [`explain`] with an injected [`ParamFormat`] implementation.
pub fn explain_with<F>(
    formatter: &F,
    sql: &str,
    numbered_placeholder: Option<&Regex>,
    escaper: &str,
    values: &[Value<'_>],
) -> String
where
    F: ParamFormat + ?Sized,
{
    let rendered: SmallVec<[CompactString; 8]> = values
        .iter()
        .map(|value| formatter.format_param(value, escaper))
        .collect();

    explain_trace!(sql, rendered.len());

    match numbered_placeholder {
        None => substitute_positional(sql, &rendered),
        Some(pattern) => substitute_numbered(sql, pattern, &rendered),
    }
}

fn substitute_positional(sql: &str, rendered: &[CompactString]) -> String {
    let extra: usize = rendered.iter().map(|v| v.len()).sum();
    let mut out = String::with_capacity(sql.len() + extra);
    let mut next = 0;

    for ch in sql.chars() {
        if ch == '?' && next < rendered.len() {
            out.push_str(&rendered[next]);
            next += 1;
        } else {
            out.push(ch);
        }
    }

    out
}

fn substitute_numbered(sql: &str, pattern: &Regex, rendered: &[CompactString]) -> String {
    // Normalize the caller's pattern into canonical `$N$` tokens first, so
    // substitution only has one token shape to deal with.
    let canonical = pattern.replace_all(sql, "$$${1}$$");

    NUMBERED_TOKEN
        .replace_all(&canonical, |caps: &Captures<'_>| {
            match caps[1].parse::<usize>() {
                // External numbering is 1-based.
                Ok(n) if n >= 1 && n <= rendered.len() => rendered[n - 1].to_string(),
                // Out of range or unparseable: leave the canonical token.
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}
