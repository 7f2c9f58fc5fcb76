//! Tracing utilities for explain-render observability.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! The macro no-ops when the feature is disabled, avoiding `#[cfg]`
//! boilerplate at every call site.

/// Emit a debug-level tracing event with the SQL template and parameter count.
///
/// ```ignore
/// explain_trace!(&sql, values.len());
/// ```
#[macro_export]
macro_rules! explain_trace {
    ($sql:expr, $param_count:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(sql = %$sql, params = $param_count, "sql_explain.render");
    };
}
