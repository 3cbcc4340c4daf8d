//! Lowering of a [`QueryDescriptor`] into parameterized SQL.
//!
//! Property names are resolved to storage names through the schema's
//! [`ColumnRegistry`]; literal values never appear in the text, only `?` placeholders
//! with the values collected in order.
//!
//! ```
//! use buoy::{compile, Column, ColumnRegistry, Comparator, DataType, QueryDescriptor};
//!
//! let registry = ColumnRegistry::new(vec![Column::new("NAME", "name", DataType::Text)])?;
//! let descriptor = QueryDescriptor::new("Users")
//!     .and_where("name", Comparator::Eq, "Ada")
//!     .with_sort("id", true);
//!
//! let statement = compile(&descriptor, &registry)?;
//! assert_eq!(
//!     statement.sql,
//!     "SELECT * FROM Users WHERE NAME = ? ORDER BY ROWID DESC LIMIT 1000"
//! );
//! assert_eq!(statement.params.len(), 1);
//! # Ok::<(), buoy::BuoyError>(())
//! ```

use super::condition::Condition;
use super::descriptor::QueryDescriptor;
use crate::config::DEFAULT_LIMIT;
use crate::error::BuoyError;
use crate::schema::ColumnRegistry;
use crate::value::Value;
use std::fmt;

/// A compiled statement: SQL text plus one parameter per placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)?;
        if !self.params.is_empty() {
            f.write_str(" -- [")?;
            for (i, param) in self.params.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{param}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

/// SQL compiler with a configurable default limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlCompiler {
    default_limit: u64,
}

impl Default for SqlCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl SqlCompiler {
    pub fn new(default_limit: u64) -> Self {
        Self { default_limit }
    }

    pub fn default_limit(&self) -> u64 {
        self.default_limit
    }

    /// Compile a descriptor against a registry.
    ///
    /// # Errors
    ///
    /// Returns [`BuoyError::UnknownField`] if a projected, filtered or sorted property is
    /// not registered.
    pub fn compile(
        &self,
        descriptor: &QueryDescriptor,
        registry: &ColumnRegistry,
    ) -> Result<Statement, BuoyError> {
        let table = descriptor.table();
        let column_of = |property: &str| resolve(registry, table, property);

        let mut sql = String::from("SELECT ");
        match descriptor.columns() {
            Some(columns) if !columns.is_empty() => {
                let names = columns
                    .iter()
                    .map(|p| column_of(p))
                    .collect::<Result<Vec<_>, _>>()?;
                sql.push_str(&names.join(", "));
            }
            _ => sql.push('*'),
        }
        sql.push_str(" FROM ");
        sql.push_str(table);

        let mut params = Vec::new();
        if let Some(condition) = descriptor.condition() {
            sql.push_str(" WHERE ");
            lower_condition(condition, registry, table, &mut sql, &mut params)?;
        }

        if let Some(sort) = descriptor.sort() {
            let direction = if sort.descending { "DESC" } else { "ASC" };
            sql.push_str(&format!(" ORDER BY {} {direction}", column_of(&sort.property)?));
        }

        match descriptor.limit() {
            Some(limit) => {
                sql.push_str(&format!(" LIMIT {} OFFSET {}", limit.count, limit.offset));
            }
            None => sql.push_str(&format!(" LIMIT {}", self.default_limit)),
        }

        Ok(Statement { sql, params })
    }
}

/// Compile with the stock default limit of 1000.
pub fn compile(
    descriptor: &QueryDescriptor,
    registry: &ColumnRegistry,
) -> Result<Statement, BuoyError> {
    SqlCompiler::default().compile(descriptor, registry)
}

fn resolve<'r>(
    registry: &'r ColumnRegistry,
    table: &str,
    property: &str,
) -> Result<&'r str, BuoyError> {
    registry
        .by_property(property)
        .map(|column| column.name())
        .ok_or_else(|| BuoyError::UnknownField {
            table: table.to_string(),
            field: property.to_string(),
        })
}

fn lower_condition(
    condition: &Condition,
    registry: &ColumnRegistry,
    table: &str,
    sql: &mut String,
    params: &mut Vec<Value>,
) -> Result<(), BuoyError> {
    match condition {
        Condition::Leaf {
            field,
            comparator,
            value,
        } => {
            sql.push_str(resolve(registry, table, field)?);
            sql.push(' ');
            sql.push_str(comparator.as_str());
            sql.push_str(" ?");
            params.push(value.clone());
        }
        Condition::Combinator {
            operator,
            left,
            right,
        } => {
            sql.push('(');
            lower_condition(left, registry, table, sql, params)?;
            sql.push(' ');
            sql.push_str(operator.as_str());
            sql.push(' ');
            lower_condition(right, registry, table, sql, params)?;
            sql.push(')');
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Comparator;
    use crate::schema::{Column, DataType};

    fn registry() -> ColumnRegistry {
        ColumnRegistry::new(vec![
            Column::new("NAME", "name", DataType::Varchar),
            Column::new("AGE", "age", DataType::Int),
        ])
        .unwrap()
    }

    #[test]
    fn test_projection_resolves_storage_names() {
        let d = QueryDescriptor::new("Users").with_columns(vec!["id".into(), "name".into()]);
        let stmt = compile(&d, &registry()).unwrap();
        assert_eq!(stmt.sql, "SELECT ROWID, NAME FROM Users LIMIT 1000");
        assert!(stmt.params.is_empty());
    }

    #[test]
    fn test_nested_conditions_are_parenthesized() {
        let a = Condition::leaf("name", Comparator::Eq, "Ada");
        let b = Condition::leaf("age", Comparator::Gte, 30);
        let c = Condition::leaf("age", Comparator::Lt, 18);
        let d = QueryDescriptor::new("Users").with_condition(a.and(&b).or(&c));

        let stmt = compile(&d, &registry()).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT * FROM Users WHERE ((NAME = ? AND AGE >= ?) OR AGE < ?) LIMIT 1000"
        );
        assert_eq!(
            stmt.params,
            vec![Value::from("Ada"), Value::Int(30), Value::Int(18)]
        );
    }

    #[test]
    fn test_explicit_limit_has_offset() {
        let d = QueryDescriptor::new("Users").with_limit(10, 0);
        let stmt = compile(&d, &registry()).unwrap();
        assert!(stmt.sql.ends_with("LIMIT 10 OFFSET 0"));
    }

    #[test]
    fn test_configured_default_limit() {
        let d = QueryDescriptor::new("Users");
        let stmt = SqlCompiler::new(50).compile(&d, &registry()).unwrap();
        assert_eq!(stmt.sql, "SELECT * FROM Users LIMIT 50");
    }

    #[test]
    fn test_unknown_sort_property() {
        let d = QueryDescriptor::new("Users").with_sort("NAME", false);
        match compile(&d, &registry()) {
            Err(BuoyError::UnknownField { table, field }) => {
                assert_eq!(table, "Users");
                assert_eq!(field, "NAME");
            }
            other => panic!("expected UnknownField, got {other:?}"),
        }
    }

    #[test]
    fn test_statement_display_lists_params() {
        let d = QueryDescriptor::new("Users").and_where("name", Comparator::Ne, "O'Hara");
        let stmt = compile(&d, &registry()).unwrap();
        assert_eq!(
            stmt.to_string(),
            "SELECT * FROM Users WHERE NAME != ? LIMIT 1000 -- ['O''Hara']"
        );
    }
}
