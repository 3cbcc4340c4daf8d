//! ValueType trait for checked value conversions
//!
//! The `ValueType` trait maps Rust field types to their corresponding [`Value`] variant.
//! Model setters generated by `#[derive(Model)]` go through it, so a raw row cell of the
//! wrong kind is reported instead of silently reinterpreted.
//!
//! ## Conversions
//!
//! - `bool` ↔ `Value::Bool`
//! - `i32`, `i64` ↔ `Value::Int` (`i32` is range checked)
//! - `f64` ↔ `Value::Double`, and accepts `Value::Int` (widening)
//! - `String` ↔ `Value::Text`
//! - `NaiveDate` ↔ `Value::Date`, `NaiveDateTime` ↔ `Value::DateTime`; both also accept
//!   `Value::Text` in the datastore's wire form (`2024-03-01`, `2024-03-01 09:30:00`)
//! - `Value` itself, untouched
//! - `Option<T>` for all of the above, with `None` ↔ `Value::Null`

use super::Value;
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// Wire form of a date cell.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Wire form of a datetime cell.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A value could not be converted into the requested Rust type.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// The value's kind does not match the target type
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// An integer does not fit the target type
    OutOfRange { target: &'static str, value: i64 },
    /// The model has no settable property with this name
    UnknownProperty(String),
}

impl ConvertError {
    pub fn mismatch(expected: &'static str, found: &Value) -> Self {
        ConvertError::TypeMismatch {
            expected,
            found: found.kind(),
        }
    }

    pub fn unknown_property(property: &str) -> Self {
        ConvertError::UnknownProperty(property.to_string())
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::TypeMismatch { expected, found } => {
                write!(f, "expected {expected} value, found {found}")
            }
            ConvertError::OutOfRange { target, value } => {
                write!(f, "value {value} is out of range for {target}")
            }
            ConvertError::UnknownProperty(property) => {
                write!(f, "unknown property `{property}`")
            }
        }
    }
}

impl std::error::Error for ConvertError {}

/// Trait for mapping Rust types to and from [`Value`].
///
/// ## Example
///
/// ```rust
/// use buoy::{Value, ValueType};
///
/// let value = 42i64.into_value();
/// assert_eq!(value, Value::Int(42));
///
/// let back = <Option<i64> as ValueType>::from_value(Value::Null).unwrap();
/// assert_eq!(back, None);
/// ```
pub trait ValueType: Sized {
    /// Convert this value into a [`Value`].
    fn into_value(self) -> Value;

    /// Convert a [`Value`] into this type, failing on a kind mismatch.
    fn from_value(value: Value) -> Result<Self, ConvertError>;
}

impl ValueType for Value {
    fn into_value(self) -> Value {
        self
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        Ok(value)
    }
}

impl ValueType for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Bool(v) => Ok(v),
            other => Err(ConvertError::mismatch("bool", &other)),
        }
    }
}

impl ValueType for i64 {
    fn into_value(self) -> Value {
        Value::Int(self)
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Int(v) => Ok(v),
            other => Err(ConvertError::mismatch("int", &other)),
        }
    }
}

impl ValueType for i32 {
    fn into_value(self) -> Value {
        Value::Int(i64::from(self))
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Int(v) => i32::try_from(v).map_err(|_| ConvertError::OutOfRange {
                target: "i32",
                value: v,
            }),
            other => Err(ConvertError::mismatch("int", &other)),
        }
    }
}

impl ValueType for f64 {
    fn into_value(self) -> Value {
        Value::Double(self)
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Double(v) => Ok(v),
            #[allow(clippy::cast_precision_loss)]
            Value::Int(v) => Ok(v as f64),
            other => Err(ConvertError::mismatch("double", &other)),
        }
    }
}

impl ValueType for String {
    fn into_value(self) -> Value {
        Value::Text(self)
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Text(v) => Ok(v),
            other => Err(ConvertError::mismatch("text", &other)),
        }
    }
}

impl ValueType for NaiveDate {
    fn into_value(self) -> Value {
        Value::Date(self)
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Date(v) => Ok(v),
            Value::Text(ref text) => NaiveDate::parse_from_str(text, DATE_FORMAT)
                .map_err(|_| ConvertError::mismatch("date", &value)),
            other => Err(ConvertError::mismatch("date", &other)),
        }
    }
}

impl ValueType for NaiveDateTime {
    fn into_value(self) -> Value {
        Value::DateTime(self)
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::DateTime(v) => Ok(v),
            Value::Text(ref text) => NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
                .map_err(|_| ConvertError::mismatch("datetime", &value)),
            other => Err(ConvertError::mismatch("datetime", &other)),
        }
    }
}

impl<T: ValueType> ValueType for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}
