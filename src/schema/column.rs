//! Column declarations.
//!
//! A [`Column`] maps a storage-level column name to a model property name and carries
//! the column's type, optional default and validators.

use super::data_type::DataType;
use super::validators::Validator;
use crate::value::Value;

/// Storage names of the system columns every table carries.
pub const ROWID: &str = "ROWID";
pub const CREATORID: &str = "CREATORID";
pub const CREATEDTIME: &str = "CREATEDTIME";
pub const MODIFIEDTIME: &str = "MODIFIEDTIME";

/// Column declaration
///
/// # Example
///
/// ```
/// use buoy::{Column, DataType, Value};
///
/// let confirmed = Column::new("CONFIRMED", "confirmed", DataType::Boolean)
///     .default_value(false);
/// assert_eq!(confirmed.default(), Some(&Value::Bool(false)));
/// ```
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    property: String,
    data_type: DataType,
    default_value: Option<Value>,
    validators: Vec<Validator>,
}

impl Column {
    pub fn new(name: impl Into<String>, property: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            property: property.into(),
            data_type,
            default_value: None,
            validators: Vec::new(),
        }
    }

    /// Value assigned to the property when a new model instance is created.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Append a validator; validators run in the order they were added.
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn validators_from(mut self, validators: impl IntoIterator<Item = Validator>) -> Self {
        self.validators.extend(validators);
        self
    }

    /// Storage column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Model property name.
    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn default(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// Run this column's validators against `value`, stopping at the first failure.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        self.validators.iter().try_for_each(|v| v.validate(value))
    }
}

/// The four system columns, in the order they are prepended to every schema.
pub fn system_columns() -> Vec<Column> {
    vec![
        Column::new(ROWID, "id", DataType::BigInt),
        Column::new(CREATORID, "createdBy", DataType::BigInt),
        Column::new(CREATEDTIME, "createdTime", DataType::DateTime),
        Column::new(MODIFIEDTIME, "modifiedTime", DataType::DateTime),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::validators;

    #[test]
    fn test_system_columns() {
        let names: Vec<_> = system_columns()
            .iter()
            .map(|c| (c.name().to_string(), c.property().to_string()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("ROWID".to_string(), "id".to_string()),
                ("CREATORID".to_string(), "createdBy".to_string()),
                ("CREATEDTIME".to_string(), "createdTime".to_string()),
                ("MODIFIEDTIME".to_string(), "modifiedTime".to_string()),
            ]
        );
    }

    #[test]
    fn test_validators_run_in_order() {
        let column = Column::new("NAME", "name", DataType::Text)
            .validator(validators::required())
            .validator(validators::max_length(2));
        assert_eq!(
            column.validate(&Value::Null),
            Err("Value cannot be null.".to_string())
        );
        assert_eq!(
            column.validate(&Value::from("abc")),
            Err("can not be more than 2 characters.".to_string())
        );
        assert!(column.validate(&Value::from("ab")).is_ok());
    }
}
