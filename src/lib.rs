//! # Buoy
//!
//! Typed query builder and row mapper for a remote tabular datastore.
//!
//! A [`Schema`] binds a table to a model type once; queries are then chained from it
//! (`select`, `and_where`, `filter`, `sort`, `limit`), compiled into parameterized SQL and
//! handed to an [`Executor`] supplied by the platform binding. Returned rows are
//! materialized into model instances through the schema's column mapping.
//!
//! ```
//! use buoy::{Column, Comparator, DataType, MockExecutor, Model, RawRow, Schema, Value};
//!
//! #[derive(Debug, Default, Model)]
//! struct User {
//!     id: Option<i64>,
//!     name: String,
//! }
//!
//! let users = Schema::builder("Users")
//!     .model(User::default)
//!     .column(Column::new("NAME", "name", DataType::Varchar))
//!     .build()?;
//!
//! let executor = MockExecutor::new();
//! let mut row = RawRow::new();
//! row.insert("ROWID".into(), Value::Int(1));
//! row.insert("NAME".into(), Value::from("Ada"));
//! executor.push_rows(vec![row.into()]);
//!
//! let found = users.query(&executor).and_where("name", Comparator::Eq, "Ada").get()?;
//! assert_eq!(found[0].id, Some(1));
//! # Ok::<(), buoy::BuoyError>(())
//! ```

// Lets `#[derive(Model)]` expand to `::buoy::...` paths inside this crate too.
extern crate self as buoy;

pub mod config;
pub mod error;
pub mod executor;
pub mod metrics;
pub mod mock;
pub mod model;
pub mod query;
pub mod schema;
pub mod value;

pub use buoy_derive::Model;

pub use config::{QueryConfig, DEFAULT_LIMIT};
pub use error::BuoyError;
pub use executor::{BackendError, Executor, RawRow, ResultRow, RowId};
pub use mock::MockExecutor;
pub use model::{materialize, Model};
pub use query::{
    compile, Comparator, Condition, IntoFields, Limit, LogicalOperator, OrderBy, Paging, Query,
    QueryDescriptor, Select, Sort, SqlCompiler, Statement, Where,
};
pub use schema::{
    validators, Column, ColumnRegistry, DataType, Schema, SchemaBuilder, SchemaConfig,
    Validator,
};
pub use value::{ConvertError, Value, ValueType};
