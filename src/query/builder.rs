//! Fluent builder chain.
//!
//! Each stage is its own type and only offers the transitions that are legal from it:
//!
//! ```text
//! Query ──select──▶ Select ─┐
//!   │                       ├─and_where/filter─▶ Where ─┐
//!   ├──and_where/filter─────┘                           │
//!   ├──sort──────────────────────────────────▶ OrderBy ◀┘
//!   └──limit─────────────────────────────────▶ Limit ◀── OrderBy
//! ```
//!
//! Every stage can `get()`, `compile()` or hand out its `descriptor()`; only [`Query`]
//! has `find_by_id`. Transitions take `&self` and return a new stage, so one stage can
//! branch into several independent chains.

use super::compiler::{SqlCompiler, Statement};
use super::condition::{Comparator, Condition};
use super::descriptor::QueryDescriptor;
use super::execution;
use crate::error::BuoyError;
use crate::executor::{Executor, RowId};
use crate::model::Model;
use crate::schema::Schema;
use crate::value::Value;

/// Field list accepted by `select`.
///
/// A string is split on whitespace (`"id name age"`); sequences are taken as-is.
pub trait IntoFields {
    fn into_fields(self) -> Vec<String>;
}

impl IntoFields for &str {
    fn into_fields(self) -> Vec<String> {
        self.split_whitespace().map(str::to_string).collect()
    }
}

impl IntoFields for String {
    fn into_fields(self) -> Vec<String> {
        self.as_str().into_fields()
    }
}

impl IntoFields for Vec<String> {
    fn into_fields(self) -> Vec<String> {
        self
    }
}

impl IntoFields for Vec<&str> {
    fn into_fields(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

impl IntoFields for &[&str] {
    fn into_fields(self) -> Vec<String> {
        self.iter().map(|f| (*f).to_string()).collect()
    }
}

impl<const N: usize> IntoFields for [&str; N] {
    fn into_fields(self) -> Vec<String> {
        self.iter().map(|f| (*f).to_string()).collect()
    }
}

macro_rules! stage {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        pub struct $name<'a, M, E> {
            schema: &'a Schema<M>,
            executor: E,
            descriptor: QueryDescriptor,
        }

        impl<'a, M: Model, E: Executor> $name<'a, M, E> {
            /// The descriptor accumulated so far.
            pub fn descriptor(&self) -> &QueryDescriptor {
                &self.descriptor
            }

            /// Compile without executing.
            pub fn compile(&self) -> Result<Statement, BuoyError> {
                compile_for(self.schema, &self.descriptor)
            }

            /// Compile, execute and materialize.
            pub fn get(&self) -> Result<Vec<M>, BuoyError> {
                let statement = self.compile()?;
                execution::fetch(self.schema, &self.executor, statement)
            }
        }

        impl<'a, M, E> $name<'a, M, E> {
            fn from_parts(schema: &'a Schema<M>, executor: E, descriptor: QueryDescriptor) -> Self {
                Self {
                    schema,
                    executor,
                    descriptor,
                }
            }
        }
    };
}

macro_rules! transitions {
    (where: $name:ident) => {
        impl<'a, M: Model, E: Executor + Clone> $name<'a, M, E> {
            /// AND a `field comparator value` leaf onto the current condition.
            pub fn and_where(
                &self,
                field: impl Into<String>,
                comparator: Comparator,
                value: impl Into<Value>,
            ) -> Where<'a, M, E> {
                Where::from_parts(
                    self.schema,
                    self.executor.clone(),
                    self.descriptor.and_where(field, comparator, value),
                )
            }

            /// Replace the current condition with `condition`.
            ///
            /// Conditions added earlier with `and_where` are discarded.
            pub fn filter(&self, condition: Condition) -> Where<'a, M, E> {
                Where::from_parts(
                    self.schema,
                    self.executor.clone(),
                    self.descriptor.with_condition(condition),
                )
            }
        }
    };
    (sort: $name:ident) => {
        impl<'a, M: Model, E: Executor + Clone> $name<'a, M, E> {
            pub fn sort(&self, field: impl Into<String>, descending: bool) -> OrderBy<'a, M, E> {
                OrderBy::from_parts(
                    self.schema,
                    self.executor.clone(),
                    self.descriptor.with_sort(field, descending),
                )
            }

            pub fn sort_asc(&self, field: impl Into<String>) -> OrderBy<'a, M, E> {
                self.sort(field, false)
            }

            pub fn sort_desc(&self, field: impl Into<String>) -> OrderBy<'a, M, E> {
                self.sort(field, true)
            }
        }
    };
    (limit: $name:ident) => {
        impl<'a, M: Model, E: Executor + Clone> $name<'a, M, E> {
            /// Limit to `count` rows from offset 0.
            pub fn limit(&self, count: u64) -> Limit<'a, M, E> {
                self.limit_offset(count, 0)
            }

            pub fn limit_offset(&self, count: u64, offset: u64) -> Limit<'a, M, E> {
                Limit::from_parts(
                    self.schema,
                    self.executor.clone(),
                    self.descriptor.with_limit(count, offset),
                )
            }
        }
    };
}

stage! {
    /// Entry stage, returned by [`Schema::query`].
    Query
}
stage! {
    /// After `select`.
    Select
}
stage! {
    /// After `and_where` or `filter`.
    Where
}
stage! {
    /// After `sort`.
    OrderBy
}
stage! {
    /// After `limit`; only terminal operations remain.
    Limit
}

transitions!(where: Query);
transitions!(where: Select);
transitions!(where: Where);
transitions!(sort: Query);
transitions!(sort: Select);
transitions!(sort: Where);
transitions!(limit: Query);
transitions!(limit: Select);
transitions!(limit: Where);
transitions!(limit: OrderBy);

impl<'a, M: Model, E> Query<'a, M, E> {
    pub(crate) fn new(schema: &'a Schema<M>, executor: E) -> Self {
        Self::from_parts(schema, executor, QueryDescriptor::new(schema.table()))
    }
}

impl<'a, M: Model, E: Executor + Clone> Query<'a, M, E> {
    /// Project the given properties instead of every column.
    pub fn select(&self, fields: impl IntoFields) -> Select<'a, M, E> {
        Select::from_parts(
            self.schema,
            self.executor.clone(),
            self.descriptor.with_columns(fields.into_fields()),
        )
    }
}

impl<'a, M: Model, E: Executor> Query<'a, M, E> {
    /// Fetch one row by identifier, bypassing the compiler.
    ///
    /// # Errors
    ///
    /// Returns [`BuoyError::EntityNotFound`] if the executor has no such row.
    pub fn find_by_id(&self, id: impl Into<RowId>) -> Result<M, BuoyError> {
        execution::find_by_id(self.schema, &self.executor, id.into())
    }
}

fn compile_for<M: Model>(
    schema: &Schema<M>,
    descriptor: &QueryDescriptor,
) -> Result<Statement, BuoyError> {
    let settings = schema.settings();
    let statement =
        SqlCompiler::new(settings.default_limit).compile(descriptor, schema.registry())?;
    if settings.log_statements {
        log::debug!("{}: {statement}", schema.table());
    }
    Ok(statement)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lists_are_equivalent() {
        let expected = vec!["id".to_string(), "name".to_string()];
        assert_eq!("id  name".into_fields(), expected);
        assert_eq!(String::from(" id name ").into_fields(), expected);
        assert_eq!(vec!["id", "name"].into_fields(), expected);
        assert_eq!(["id", "name"].into_fields(), expected);
        assert_eq!((&["id", "name"][..]).into_fields(), expected);
        assert_eq!(expected.clone().into_fields(), expected);
    }

    #[test]
    fn test_empty_field_string() {
        assert!("   ".into_fields().is_empty());
    }
}
