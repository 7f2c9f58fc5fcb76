//! Renders SQL templates with bound parameter values into single
//! human-readable strings, for tracing and debug logging.
//!
//! Substitution is purely textual and best-effort: the output shows what
//! *would* be executed and must never be fed back to an execution path,
//! since no injection protection is applied.
//!
//! ```
//! use sql_explain::{Value, explain};
//!
//! let sql = explain(
//!     "SELECT * FROM users WHERE id = ? AND active = ?",
//!     None,
//!     "'",
//!     &[Value::from(42), Value::from(true)],
//! );
//! assert_eq!(sql, "SELECT * FROM users WHERE id = 42 AND active = true");
//! ```

pub mod error;
pub mod explain;
pub mod format;
pub mod tracing;
pub mod value;

// Re-export key types and traits
pub use error::ExplainError;
pub use explain::{explain, explain_with};
pub use format::{
    BINARY_LITERAL, NULL_LITERAL, ParamFormat, ParamFormatter, TIME_FORMAT_MILLIS,
    ZERO_TIME_LITERAL,
};
pub use value::{AnyValue, DriverValue, Value, ValueKind};
