//! Schema declaration and registration.
//!
//! A [`Schema`] binds a datastore table to a model type: it owns the column registry,
//! the model factory and the query settings, and is the entry point of every query
//! chain (`schema.query(&executor)`).
//!
//! Registration validates the declaration once. After that the schema is immutable and
//! can be shared freely between threads and coroutines.

pub mod column;
pub mod data_type;
pub mod registry;
pub mod validators;

pub use column::Column;
pub use data_type::DataType;
pub use registry::ColumnRegistry;
pub use validators::Validator;

use crate::config::QueryConfig;
use crate::error::BuoyError;
use crate::executor::{Executor, RawRow};
use crate::model::Model;
use crate::query::Query;
use crate::value::Value;
use std::sync::Arc;

/// Zero-argument constructor for a model's blank instance.
pub type ModelFactory<M> = fn() -> M;

/// Schema declaration, as written by the application.
pub struct SchemaConfig<M> {
    /// Table name in the datastore
    pub table: String,
    /// Declared columns; the system columns are added automatically
    pub columns: Vec<Column>,
    /// Factory for blank model instances
    pub model: Option<ModelFactory<M>>,
    pub settings: QueryConfig,
}

impl<M> Default for SchemaConfig<M> {
    fn default() -> Self {
        Self {
            table: String::new(),
            columns: Vec::new(),
            model: None,
            settings: QueryConfig::default(),
        }
    }
}

/// A registered model schema for one datastore table
///
/// # Example
///
/// ```
/// use buoy::{Column, DataType, Model, Schema};
///
/// #[derive(Debug, Default, Model)]
/// struct User {
///     id: Option<i64>,
///     name: String,
///     confirmed: bool,
/// }
///
/// let users = Schema::builder("Users")
///     .model(User::default)
///     .column(Column::new("NAME", "name", DataType::Varchar))
///     .column(Column::new("CONFIRMED", "confirmed", DataType::Boolean).default_value(false))
///     .build()?;
///
/// assert_eq!(users.table(), "Users");
/// assert!(!users.new_instance().confirmed);
/// # Ok::<(), buoy::BuoyError>(())
/// ```
#[derive(Debug)]
pub struct Schema<M> {
    table: String,
    registry: Arc<ColumnRegistry>,
    factory: ModelFactory<M>,
    defaults: Vec<(String, Value)>,
    settings: QueryConfig,
}

impl<M: Model> Schema<M> {
    /// Register a schema declaration.
    ///
    /// # Errors
    ///
    /// Returns [`BuoyError::SchemaConfiguration`] when the table name is empty, the model
    /// factory is missing, column names or properties collide, a declared column's
    /// property is not exposed by the model, or a default value cannot be assigned.
    pub fn new(config: SchemaConfig<M>) -> Result<Self, BuoyError> {
        let SchemaConfig {
            table,
            columns,
            model,
            settings,
        } = config;

        if table.trim().is_empty() {
            return Err(BuoyError::schema("table name must not be empty"));
        }
        let factory =
            model.ok_or_else(|| BuoyError::schema("a model must be provided for the schema"))?;

        for column in &columns {
            if !M::has_property(column.property()) {
                return Err(BuoyError::schema(format!(
                    "column `{}` maps to property `{}`, which the model does not expose",
                    column.name(),
                    column.property()
                )));
            }
        }

        let registry = ColumnRegistry::new(columns)?;

        let defaults: Vec<(String, Value)> = registry
            .columns()
            .iter()
            .filter_map(|c| c.default().map(|v| (c.property().to_string(), v.clone())))
            .collect();

        // Defaults are assigned to every new instance; check them once here.
        let mut sample = factory();
        for (property, value) in &defaults {
            sample.set_property(property, value.clone()).map_err(|e| {
                BuoyError::schema(format!("default for `{property}` cannot be assigned: {e}"))
            })?;
        }

        log::debug!(
            "registered schema for {table} with {} columns",
            registry.len()
        );

        Ok(Self {
            table,
            registry: Arc::new(registry),
            factory,
            defaults,
            settings,
        })
    }

    /// Start a declaration with the builder API.
    pub fn builder(table: impl Into<String>) -> SchemaBuilder<M> {
        SchemaBuilder {
            config: SchemaConfig {
                table: table.into(),
                ..SchemaConfig::default()
            },
        }
    }

    /// Table name in the datastore.
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &QueryConfig {
        &self.settings
    }

    /// A fresh model instance with column defaults applied.
    pub fn new_instance(&self) -> M {
        let mut instance = (self.factory)();
        for (property, value) in &self.defaults {
            if let Err(e) = instance.set_property(property, value.clone()) {
                log::warn!("{}: default for `{property}` not applied: {e}", self.table);
            }
        }
        instance
    }

    /// Entry point of a query chain executed by `executor`.
    pub fn query<E: Executor>(&self, executor: E) -> Query<'_, M, E> {
        Query::new(self, executor)
    }

    /// Run every column's validators against the model's current values.
    ///
    /// Columns whose property the model does not expose are checked against `NULL`.
    ///
    /// # Errors
    ///
    /// Returns the first [`BuoyError::Validation`] failure, in column order.
    pub fn validate(&self, model: &M) -> Result<(), BuoyError> {
        self.validate_with(|column| model.property(column.property()).unwrap_or_default())
    }

    /// Run every column's validators against a raw row keyed by storage name.
    ///
    /// Missing cells are checked as `NULL`.
    ///
    /// # Errors
    ///
    /// Returns the first [`BuoyError::Validation`] failure, in column order.
    pub fn validate_row(&self, row: &RawRow) -> Result<(), BuoyError> {
        self.validate_with(|column| row.get(column.name()).cloned().unwrap_or_default())
    }

    fn validate_with<F>(&self, value_of: F) -> Result<(), BuoyError>
    where
        F: Fn(&Column) -> Value,
    {
        for column in self.registry.columns() {
            if column.validators().is_empty() {
                continue;
            }
            column
                .validate(&value_of(column))
                .map_err(|message| BuoyError::Validation {
                    property: column.property().to_string(),
                    message,
                })?;
        }
        Ok(())
    }
}

/// Builder for [`Schema`].
pub struct SchemaBuilder<M> {
    config: SchemaConfig<M>,
}

impl<M: Model> SchemaBuilder<M> {
    pub fn column(mut self, column: Column) -> Self {
        self.config.columns.push(column);
        self
    }

    pub fn columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.config.columns.extend(columns);
        self
    }

    pub fn model(mut self, factory: ModelFactory<M>) -> Self {
        self.config.model = Some(factory);
        self
    }

    pub fn settings(mut self, settings: QueryConfig) -> Self {
        self.config.settings = settings;
        self
    }

    /// Register the schema; see [`Schema::new`].
    pub fn build(self) -> Result<Schema<M>, BuoyError> {
        Schema::new(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Model;

    #[derive(Debug, Default, Model)]
    struct Product {
        id: Option<i64>,
        title: String,
        stock: i64,
        price: Option<f64>,
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("TITLE", "title", DataType::Varchar)
                .validator(validators::required())
                .validator(validators::max_length(10)),
            Column::new("STOCK", "stock", DataType::Int).default_value(5i64),
            Column::new("PRICE", "price", DataType::Double)
                .validator(validators::max_decimal_digits(2)),
        ]
    }

    #[test]
    fn test_registry_has_declared_plus_system_columns() {
        let schema = Schema::builder("Products")
            .model(Product::default)
            .columns(columns())
            .build()
            .unwrap();
        assert_eq!(schema.registry().name_count(), columns().len() + 4);
        assert_eq!(schema.registry().property_count(), columns().len() + 4);
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = Schema::<Product>::builder("  ")
            .model(Product::default)
            .build()
            .unwrap_err();
        assert!(matches!(err, BuoyError::SchemaConfiguration(_)));
    }

    #[test]
    fn test_missing_model_rejected() {
        let err = Schema::<Product>::new(SchemaConfig {
            table: "Products".into(),
            ..SchemaConfig::default()
        })
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Schema configuration error: a model must be provided for the schema"
        );
    }

    #[test]
    fn test_property_missing_on_model_rejected() {
        let err = Schema::builder("Products")
            .model(Product::default)
            .column(Column::new("COLOR", "color", DataType::Text))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("`color`"));
    }

    #[test]
    fn test_default_with_wrong_kind_rejected() {
        let err = Schema::builder("Products")
            .model(Product::default)
            .column(Column::new("STOCK", "stock", DataType::Int).default_value("many"))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("default for `stock`"));
    }

    #[test]
    fn test_new_instance_applies_defaults() {
        let schema = Schema::builder("Products")
            .model(Product::default)
            .columns(columns())
            .build()
            .unwrap();
        assert_eq!(schema.new_instance().stock, 5);
    }

    #[test]
    fn test_validate_model() {
        let schema = Schema::builder("Products")
            .model(Product::default)
            .columns(columns())
            .build()
            .unwrap();

        let mut product = schema.new_instance();
        let err = schema.validate(&product).unwrap_err();
        assert!(matches!(
            err,
            BuoyError::Validation { ref property, .. } if property == "title"
        ));

        product.title = "Lamp".into();
        product.price = Some(9.999);
        let err = schema.validate(&product).unwrap_err();
        assert!(matches!(
            err,
            BuoyError::Validation { ref property, .. } if property == "price"
        ));

        product.price = Some(9.99);
        assert!(schema.validate(&product).is_ok());
    }

    #[test]
    fn test_validate_row() {
        let schema = Schema::builder("Products")
            .model(Product::default)
            .columns(columns())
            .build()
            .unwrap();

        let mut row = RawRow::new();
        row.insert("TITLE".into(), Value::from("A very long title"));
        let err = schema.validate_row(&row).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed for `title`: can not be more than 10 characters."
        );

        row.insert("TITLE".into(), Value::from("Lamp"));
        assert!(schema.validate_row(&row).is_ok());
    }
}
