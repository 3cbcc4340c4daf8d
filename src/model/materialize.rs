//! Raw row → model instance.

use super::Model;
use crate::error::BuoyError;
use crate::executor::RawRow;
use crate::schema::Schema;

/// Turn a raw row into a model instance.
///
/// Starts from [`Schema::new_instance`] (factory plus column defaults), then assigns
/// every cell whose key is a registered storage name and whose property the model
/// exposes. Other keys are dropped. Validators are not run.
///
/// # Errors
///
/// Returns [`BuoyError::Conversion`] when a cell's kind does not fit the model field.
pub fn materialize<M: Model>(row: RawRow, schema: &Schema<M>) -> Result<M, BuoyError> {
    let mut instance = schema.new_instance();
    let registry = schema.registry();

    for (name, value) in row {
        let Some(column) = registry.by_name(&name) else {
            log::trace!("{}: dropping undeclared column {name}", schema.table());
            continue;
        };
        let property = column.property();
        if !M::has_property(property) {
            continue;
        }
        instance
            .set_property(property, value)
            .map_err(|source| BuoyError::Conversion {
                property: property.to_string(),
                source,
            })?;
    }

    Ok(instance)
}
