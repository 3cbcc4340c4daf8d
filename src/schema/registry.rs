//! Column registry: storage name ↔ property lookups for one schema.

use super::column::{system_columns, Column};
use crate::error::BuoyError;
use std::collections::HashMap;

/// Lookup table built once per schema.
///
/// Holds the system columns followed by the declared columns, indexed both by storage
/// name and by property name. Immutable after construction.
#[derive(Debug, Clone)]
pub struct ColumnRegistry {
    columns: Vec<Column>,
    by_name: HashMap<String, usize>,
    by_property: HashMap<String, usize>,
}

impl ColumnRegistry {
    /// Build a registry from declared columns, prepending the system columns.
    ///
    /// # Errors
    ///
    /// Returns [`BuoyError::SchemaConfiguration`] when a storage name or property is
    /// declared twice, or when a declared column reuses a system column's name or
    /// property.
    pub fn new(declared: Vec<Column>) -> Result<Self, BuoyError> {
        let system = system_columns();
        let system_count = system.len();
        let mut columns = system;
        columns.extend(declared);

        let mut by_name = HashMap::with_capacity(columns.len());
        let mut by_property = HashMap::with_capacity(columns.len());

        for (index, column) in columns.iter().enumerate() {
            let reserved = |other: usize| other < system_count && index >= system_count;

            if let Some(&other) = by_name.get(column.name()) {
                return Err(if reserved(other) {
                    BuoyError::schema(format!(
                        "column name `{}` is reserved for a system column",
                        column.name()
                    ))
                } else {
                    BuoyError::schema(format!("duplicate column name `{}`", column.name()))
                });
            }
            if let Some(&other) = by_property.get(column.property()) {
                return Err(if reserved(other) {
                    BuoyError::schema(format!(
                        "property `{}` is reserved for a system column",
                        column.property()
                    ))
                } else {
                    BuoyError::schema(format!("duplicate property `{}`", column.property()))
                });
            }
            if column.name().is_empty() || column.property().is_empty() {
                return Err(BuoyError::schema(
                    "column name and property must not be empty",
                ));
            }

            by_name.insert(column.name().to_string(), index);
            by_property.insert(column.property().to_string(), index);
        }

        Ok(Self {
            columns,
            by_name,
            by_property,
        })
    }

    /// Look up a column by its storage name.
    pub fn by_name(&self, name: &str) -> Option<&Column> {
        self.by_name.get(name).map(|&i| &self.columns[i])
    }

    /// Look up a column by its model property.
    pub fn by_property(&self, property: &str) -> Option<&Column> {
        self.by_property.get(property).map(|&i| &self.columns[i])
    }

    /// All columns, system columns first.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of entries in the storage-name index.
    pub fn name_count(&self) -> usize {
        self.by_name.len()
    }

    /// Number of entries in the property index.
    pub fn property_count(&self) -> usize {
        self.by_property.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DataType;

    fn declared() -> Vec<Column> {
        vec![
            Column::new("NAME", "name", DataType::Text),
            Column::new("AGE", "age", DataType::Int),
        ]
    }

    #[test]
    fn test_system_columns_are_prepended() {
        let registry = ColumnRegistry::new(declared()).unwrap();
        let names: Vec<_> = registry.columns().iter().map(Column::name).collect();
        assert_eq!(
            names,
            vec!["ROWID", "CREATORID", "CREATEDTIME", "MODIFIEDTIME", "NAME", "AGE"]
        );
    }

    #[test]
    fn test_registry_sizes() {
        let registry = ColumnRegistry::new(declared()).unwrap();
        assert_eq!(registry.name_count(), 6);
        assert_eq!(registry.property_count(), 6);

        let empty = ColumnRegistry::new(Vec::new()).unwrap();
        assert_eq!(empty.name_count(), 4);
        assert!(empty.by_property("id").is_some());
        assert!(empty.by_name("MODIFIEDTIME").is_some());
    }

    #[test]
    fn test_lookup_both_ways() {
        let registry = ColumnRegistry::new(declared()).unwrap();
        assert_eq!(registry.by_property("age").map(Column::name), Some("AGE"));
        assert_eq!(registry.by_name("NAME").map(Column::property), Some("name"));
        assert!(registry.by_property("AGE").is_none());
    }

    #[test]
    fn test_duplicate_property_rejected() {
        let err = ColumnRegistry::new(vec![
            Column::new("NAME", "name", DataType::Text),
            Column::new("FULL_NAME", "name", DataType::Text),
        ])
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Schema configuration error: duplicate property `name`"
        );
    }

    #[test]
    fn test_reserved_name_rejected() {
        let err =
            ColumnRegistry::new(vec![Column::new("ROWID", "rowId", DataType::BigInt)]).unwrap_err();
        assert!(err.to_string().contains("reserved"));

        let err =
            ColumnRegistry::new(vec![Column::new("OWNER", "createdBy", DataType::BigInt)])
                .unwrap_err();
        assert!(err.to_string().contains("reserved"));
    }
}
