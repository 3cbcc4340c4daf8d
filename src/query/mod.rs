//! Query building, compilation and execution.
//!
//! A chain starts at [`Schema::query`](crate::Schema::query), accumulates an immutable
//! [`QueryDescriptor`], and ends either in `get()` (compile, run, materialize) or
//! `find_by_id()` (direct lookup).
//!
//! # Architecture
//!
//! - **Condition**: boolean filter trees (`Condition`, `Comparator`, `LogicalOperator`)
//! - **Descriptor**: the persistent record each stage produces
//! - **Builder**: the stage types and their legal transitions
//! - **Compiler**: descriptor + registry to SQL text and parameters
//! - **Execution**: the adapter round trip and materialization
//!
//! # Examples
//!
//! ```
//! use buoy::{Column, Comparator, DataType, MockExecutor, Model, Schema};
//!
//! #[derive(Debug, Default, Model)]
//! struct User {
//!     id: Option<i64>,
//!     name: String,
//!     age: i64,
//! }
//!
//! let users = Schema::builder("Users")
//!     .model(User::default)
//!     .column(Column::new("NAME", "name", DataType::Varchar))
//!     .column(Column::new("AGE", "age", DataType::Int))
//!     .build()?;
//! let executor = MockExecutor::new();
//!
//! let statement = users
//!     .query(&executor)
//!     .select("id name")
//!     .and_where("age", Comparator::Gte, 18)
//!     .sort_desc("age")
//!     .limit_offset(10, 5)
//!     .compile()?;
//!
//! assert_eq!(
//!     statement.sql,
//!     "SELECT ROWID, NAME FROM Users WHERE AGE >= ? ORDER BY AGE DESC LIMIT 10 OFFSET 5"
//! );
//! # Ok::<(), buoy::BuoyError>(())
//! ```

// Filter trees
pub mod condition;
#[doc(inline)]
pub use condition::{Comparator, Condition, LogicalOperator, ParseComparatorError};

// Persistent query record
pub mod descriptor;
#[doc(inline)]
pub use descriptor::{Paging, QueryDescriptor, Sort};

// Stage types
pub mod builder;
#[doc(inline)]
pub use builder::{IntoFields, Limit, OrderBy, Query, Select, Where};

// SQL lowering
pub mod compiler;
#[doc(inline)]
pub use compiler::{compile, SqlCompiler, Statement};

// Adapter round trips
pub(crate) mod execution;
