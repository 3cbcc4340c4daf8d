//! Procedural macros for Buoy
//!
//! This crate provides the `Model` derive used by `buoy` schemas.

mod attributes;
mod macros;
mod utils;

use proc_macro::TokenStream;

/// Derive macro for `Model` - generates the property table and checked accessors
///
/// This macro generates:
/// - `PROPERTIES` (one entry per non-skipped field, in declaration order)
/// - `set_property()` converting a `Value` through the field's `ValueType`
/// - `property()` reading a field back as a `Value`
///
/// Property names default to the camelCase form of the field name.
///
/// # Attributes
///
/// - `#[model(property = "name")]` - use an explicit property name
/// - `#[model(skip)]` - leave the field out of the mapping
///
/// # Example
///
/// ```
/// use buoy::Model;
///
/// #[derive(Default, Model)]
/// struct Order {
///     id: Option<i64>,
///     #[model(property = "total")]
///     amount: f64,
///     customer_name: String,
///     #[model(skip)]
///     cache: Vec<u8>,
/// }
///
/// assert_eq!(Order::PROPERTIES, &["id", "total", "customerName"]);
/// ```
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    macros::derive_model(input)
}
