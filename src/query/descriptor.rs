//! The immutable query descriptor.
//!
//! Every builder stage owns one [`QueryDescriptor`] and produces a new one for the next
//! stage; a descriptor that has been handed out is never changed.

use super::condition::{Comparator, Condition};
use crate::value::Value;

/// Sort clause, by model property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub property: String,
    pub descending: bool,
}

/// Paging clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub count: u64,
    pub offset: u64,
}

/// Everything needed to compile one query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescriptor {
    table: String,
    columns: Option<Vec<String>>,
    condition: Option<Condition>,
    sort: Option<Sort>,
    limit: Option<Paging>,
}

impl QueryDescriptor {
    /// A descriptor selecting every column of `table`.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: None,
            condition: None,
            sort: None,
            limit: None,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Projected properties, or `None` for all columns.
    pub fn columns(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    pub fn limit(&self) -> Option<Paging> {
        self.limit
    }

    /// Copy with the projection set.
    pub fn with_columns(&self, columns: Vec<String>) -> Self {
        Self {
            columns: Some(columns),
            ..self.clone()
        }
    }

    /// Copy with the condition replaced.
    pub fn with_condition(&self, condition: Condition) -> Self {
        Self {
            condition: Some(condition),
            ..self.clone()
        }
    }

    /// Copy with a leaf ANDed onto the existing condition (or set, if there is none).
    pub fn and_where(
        &self,
        field: impl Into<String>,
        comparator: Comparator,
        value: impl Into<Value>,
    ) -> Self {
        let leaf = Condition::leaf(field, comparator, value);
        let condition = match &self.condition {
            Some(existing) => existing.and(&leaf),
            None => leaf,
        };
        self.with_condition(condition)
    }

    /// Copy with the sort clause set.
    pub fn with_sort(&self, property: impl Into<String>, descending: bool) -> Self {
        Self {
            sort: Some(Sort {
                property: property.into(),
                descending,
            }),
            ..self.clone()
        }
    }

    /// Copy with the limit clause set.
    pub fn with_limit(&self, count: u64, offset: u64) -> Self {
        Self {
            limit: Some(Paging { count, offset }),
            ..self.clone()
        }
    }
}
