//! `Executor` Module
//!
//! Provides the `Executor` trait that abstracts the datastore round trip.
//!
//! The query layer never talks to the network itself: it hands a compiled statement (or
//! a row identifier) to an `Executor` implementation supplied by the platform binding and
//! materializes whatever raw rows come back.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

#[cfg(feature = "metrics")]
use crate::metrics::METRICS;
#[cfg(feature = "tracing")]
use crate::metrics::tracing_helpers;

/// Error reported by an execution adapter, carried through the query layer untouched.
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

/// A raw row keyed by storage column name.
pub type RawRow = BTreeMap<String, Value>;

/// Primary identifier of a datastore row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Number(n) => write!(f, "{n}"),
            RowId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for RowId {
    fn from(id: i64) -> Self {
        RowId::Number(id)
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        RowId::Text(id.to_string())
    }
}

impl From<String> for RowId {
    fn from(id: String) -> Self {
        RowId::Text(id)
    }
}

/// One row of a query result as returned by the backend.
///
/// Some backends nest each row under its table name (`{"Users": {"ROWID": 1}}`); others
/// return the columns directly. Both shapes deserialize from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultRow {
    Flat(RawRow),
    Grouped(BTreeMap<String, RawRow>),
}

impl ResultRow {
    /// Extract the columns belonging to `table`.
    ///
    /// Flat rows are returned as-is. Grouped rows yield the entry for `table`, or `None`
    /// when the row carries no data for it.
    pub fn into_table_row(self, table: &str) -> Option<RawRow> {
        match self {
            ResultRow::Flat(row) => Some(row),
            ResultRow::Grouped(mut tables) => tables.remove(table),
        }
    }
}

impl From<RawRow> for ResultRow {
    fn from(row: RawRow) -> Self {
        ResultRow::Flat(row)
    }
}

/// Trait for executing compiled queries against the datastore
///
/// Implementations wrap the backend SDK (HTTP client, embedded engine, test double).
/// Both methods perform exactly one round trip and return either a complete result or
/// an error; there are no partial results.
///
/// # Examples
///
/// ```
/// use buoy::{BackendError, Executor, RawRow, ResultRow, RowId, Value};
///
/// struct Empty;
///
/// impl Executor for Empty {
///     fn run_query(&self, _sql: &str, _params: &[Value]) -> Result<Vec<ResultRow>, BackendError> {
///         Ok(Vec::new())
///     }
///
///     fn get_by_id(&self, _table: &str, _id: &RowId) -> Result<Option<RawRow>, BackendError> {
///         Ok(None)
///     }
/// }
/// ```
pub trait Executor {
    /// Run a parameterized statement and return its rows
    ///
    /// # Arguments
    ///
    /// * `sql` - statement text with `?` placeholders
    /// * `params` - one value per placeholder, in order
    ///
    /// # Errors
    ///
    /// Returns the backend's own error if the statement fails.
    fn run_query(&self, sql: &str, params: &[Value]) -> Result<Vec<ResultRow>, BackendError>;

    /// Fetch a single row by its primary identifier
    ///
    /// Returns `Ok(None)` when the backend has no such row.
    ///
    /// # Errors
    ///
    /// Returns the backend's own error if the lookup fails.
    fn get_by_id(&self, table: &str, id: &RowId) -> Result<Option<RawRow>, BackendError>;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn run_query(&self, sql: &str, params: &[Value]) -> Result<Vec<ResultRow>, BackendError> {
        (**self).run_query(sql, params)
    }

    fn get_by_id(&self, table: &str, id: &RowId) -> Result<Option<RawRow>, BackendError> {
        (**self).get_by_id(table, id)
    }
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn run_query(&self, sql: &str, params: &[Value]) -> Result<Vec<ResultRow>, BackendError> {
        (**self).run_query(sql, params)
    }

    fn get_by_id(&self, table: &str, id: &RowId) -> Result<Option<RawRow>, BackendError> {
        (**self).get_by_id(table, id)
    }
}

impl<E: Executor + ?Sized> Executor for Arc<E> {
    fn run_query(&self, sql: &str, params: &[Value]) -> Result<Vec<ResultRow>, BackendError> {
        (**self).run_query(sql, params)
    }

    fn get_by_id(&self, table: &str, id: &RowId) -> Result<Option<RawRow>, BackendError> {
        (**self).get_by_id(table, id)
    }
}

/// Run a statement with tracing and metrics around the adapter call.
pub(crate) fn run_query_instrumented<E: Executor + ?Sized>(
    executor: &E,
    table: &str,
    sql: &str,
    params: &[Value],
) -> Result<Vec<ResultRow>, BackendError> {
    #[cfg(feature = "tracing")]
    let _span = tracing_helpers::run_query_span(table, sql).entered();

    let start = Instant::now();
    let result = executor.run_query(sql, params);
    let duration = start.elapsed();

    #[cfg(feature = "metrics")]
    {
        METRICS.record_query(duration);
        if result.is_err() {
            METRICS.record_query_error();
        }
    }
    log::trace!("{table}: query finished in {duration:?}");

    result
}

/// Look up a row by identifier with tracing and metrics around the adapter call.
pub(crate) fn get_by_id_instrumented<E: Executor + ?Sized>(
    executor: &E,
    table: &str,
    id: &RowId,
) -> Result<Option<RawRow>, BackendError> {
    #[cfg(feature = "tracing")]
    let _span = tracing_helpers::find_by_id_span(table, id).entered();

    let start = Instant::now();
    let result = executor.get_by_id(table, id);
    let duration = start.elapsed();

    #[cfg(feature = "metrics")]
    {
        METRICS.record_query(duration);
        match &result {
            Ok(None) => METRICS.record_not_found(),
            Err(_) => METRICS.record_query_error(),
            Ok(Some(_)) => {}
        }
    }
    log::trace!("{table}: lookup of {id} finished in {duration:?}");

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_id_display_and_from() {
        assert_eq!(RowId::from(42i64).to_string(), "42");
        assert_eq!(RowId::from("abc").to_string(), "abc");
        assert_eq!(RowId::from("abc".to_string()), RowId::Text("abc".into()));
    }

    #[test]
    fn test_flat_row_from_json() {
        let row: ResultRow = serde_json::from_str(r#"{"ROWID": 1, "NAME": "Ada"}"#).unwrap();
        let raw = row.into_table_row("Users").unwrap();
        assert_eq!(raw.get("NAME"), Some(&Value::Text("Ada".into())));
    }

    #[test]
    fn test_grouped_row_is_unwrapped() {
        let row: ResultRow =
            serde_json::from_str(r#"{"Users": {"ROWID": 1, "NAME": "Ada"}}"#).unwrap();
        assert!(matches!(row, ResultRow::Grouped(_)));
        let raw = row.into_table_row("Users").unwrap();
        assert_eq!(raw.get("ROWID"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_grouped_row_for_other_table_is_skipped() {
        let row: ResultRow = serde_json::from_str(r#"{"Orders": {"ROWID": 1}}"#).unwrap();
        assert!(row.into_table_row("Users").is_none());
    }
}
