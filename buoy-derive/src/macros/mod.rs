//! Macro implementations

mod model;

pub use model::derive_model;
