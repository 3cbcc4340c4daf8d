//! In-memory [`Executor`] for tests.
//!
//! `MockExecutor` answers from queued responses and records every call it receives, so
//! code built on the query layer can be tested without a datastore.
//!
//! ```
//! use buoy::mock::{MockCall, MockExecutor};
//! use buoy::{Executor, RawRow, Value};
//!
//! let executor = MockExecutor::new();
//! let mut row = RawRow::new();
//! row.insert("NAME".into(), Value::from("Ada"));
//! executor.push_rows(vec![row.into()]);
//!
//! let rows = executor.run_query("SELECT * FROM Users LIMIT 1000", &[]).unwrap();
//! assert_eq!(rows.len(), 1);
//! assert!(matches!(
//!     &executor.calls()[0],
//!     MockCall::RunQuery { sql, .. } if sql.contains("Users")
//! ));
//! ```

use crate::executor::{BackendError, Executor, RawRow, ResultRow, RowId};
use crate::value::Value;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

/// One call received by a [`MockExecutor`].
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    RunQuery { sql: String, params: Vec<Value> },
    GetById { table: String, id: RowId },
}

/// Failure injected with [`MockExecutor::push_failure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockError(pub String);

impl fmt::Display for MockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mock executor failure: {}", self.0)
    }
}

impl std::error::Error for MockError {}

#[derive(Debug, Default)]
struct MockState {
    results: VecDeque<Vec<ResultRow>>,
    lookups: VecDeque<Option<RawRow>>,
    failures: VecDeque<String>,
    calls: Vec<MockCall>,
}

/// Executor answering from queues.
///
/// Queries pop the next queued result set (empty when none is queued); lookups pop the
/// next queued row (`None` when none is queued). A queued failure is returned by the
/// next call of either kind instead.
#[derive(Debug, Default)]
pub struct MockExecutor {
    state: Mutex<MockState>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result set of the next `run_query`.
    pub fn push_rows(&self, rows: Vec<ResultRow>) {
        self.state().results.push_back(rows);
    }

    /// Queue the answer of the next `get_by_id`.
    pub fn push_lookup(&self, row: Option<RawRow>) {
        self.state().lookups.push_back(row);
    }

    /// Make the next call fail with a [`MockError`].
    pub fn push_failure(&self, message: impl Into<String>) {
        self.state().failures.push_back(message.into());
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state().calls.len()
    }

    /// Statements passed to `run_query`, in order.
    pub fn statements(&self) -> Vec<String> {
        self.state()
            .calls
            .iter()
            .filter_map(|call| match call {
                MockCall::RunQuery { sql, .. } => Some(sql.clone()),
                MockCall::GetById { .. } => None,
            })
            .collect()
    }

    /// Forget recorded calls and queued responses.
    pub fn reset(&self) {
        *self.state() = MockState::default();
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread must not hide the calls recorded before it.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Executor for MockExecutor {
    fn run_query(&self, sql: &str, params: &[Value]) -> Result<Vec<ResultRow>, BackendError> {
        let mut state = self.state();
        state.calls.push(MockCall::RunQuery {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        if let Some(message) = state.failures.pop_front() {
            return Err(Box::new(MockError(message)));
        }
        Ok(state.results.pop_front().unwrap_or_default())
    }

    fn get_by_id(&self, table: &str, id: &RowId) -> Result<Option<RawRow>, BackendError> {
        let mut state = self.state();
        state.calls.push(MockCall::GetById {
            table: table.to_string(),
            id: id.clone(),
        });
        if let Some(message) = state.failures.pop_front() {
            return Err(Box::new(MockError(message)));
        }
        Ok(state.lookups.pop_front().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_queues() {
        let executor = MockExecutor::new();
        assert!(executor.run_query("SELECT 1", &[]).unwrap().is_empty());
        assert!(executor.get_by_id("Users", &RowId::from(1)).unwrap().is_none());
        assert_eq!(executor.call_count(), 2);
    }

    #[test]
    fn test_failure_is_consumed_once() {
        let executor = MockExecutor::new();
        executor.push_failure("boom");
        let err = executor.run_query("SELECT 1", &[]).unwrap_err();
        assert_eq!(err.to_string(), "mock executor failure: boom");
        assert!(executor.run_query("SELECT 1", &[]).is_ok());
    }

    #[test]
    fn test_calls_are_recorded_in_order() {
        let executor = MockExecutor::new();
        executor
            .run_query("SELECT * FROM Users WHERE AGE > ?", &[Value::Int(3)])
            .unwrap();
        executor.get_by_id("Users", &RowId::from("abc")).unwrap();

        assert_eq!(
            executor.calls(),
            vec![
                MockCall::RunQuery {
                    sql: "SELECT * FROM Users WHERE AGE > ?".into(),
                    params: vec![Value::Int(3)],
                },
                MockCall::GetById {
                    table: "Users".into(),
                    id: RowId::Text("abc".into()),
                },
            ]
        );
        assert_eq!(executor.statements().len(), 1);

        executor.reset();
        assert_eq!(executor.call_count(), 0);
    }
}
