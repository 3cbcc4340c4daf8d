//! Model trait for typed row instances
//!
//! A model is the application's value type for one table row. The [`Model`] trait gives
//! the query layer a checked, name-based way to read and assign the model's properties,
//! which is all the materializer and the validation path need.
//!
//! Implement it with `#[derive(Model)]`:
//!
//! ```
//! use buoy::Model;
//!
//! #[derive(Debug, Default, Model)]
//! struct User {
//!     id: Option<i64>,
//!     created_by: Option<i64>,
//!     name: String,
//!     #[model(skip)]
//!     session_note: String,
//! }
//!
//! assert_eq!(User::PROPERTIES, &["id", "createdBy", "name"]);
//! ```

pub(crate) mod materialize;

pub use materialize::materialize;

use crate::value::{ConvertError, Value};

/// Trait for model-level property access
///
/// `PROPERTIES` lists every property the model exposes, in declaration order. The schema
/// checks its declared columns against this list once, at registration, so the
/// materializer can rely on it for every row.
pub trait Model: Sized {
    /// Property names this model exposes
    const PROPERTIES: &'static [&'static str];

    /// Assign `value` to `property`
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::UnknownProperty`] for a name not in `PROPERTIES`, or a
    /// kind mismatch when the value cannot be converted to the field's type.
    fn set_property(&mut self, property: &str, value: Value) -> Result<(), ConvertError>;

    /// Read the current value of `property`, or `None` for an unknown name
    fn property(&self, property: &str) -> Option<Value>;

    /// Whether `property` is one of `PROPERTIES`
    fn has_property(property: &str) -> bool {
        Self::PROPERTIES.contains(&property)
    }
}
