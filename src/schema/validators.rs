//! Column validators.
//!
//! A [`Validator`] is a named check over a single [`Value`]. Validators are attached to
//! columns in the schema declaration and run only when a caller asks for validation
//! (`Schema::validate` / `Schema::validate_row`); the read pipeline never invokes them.
//!
//! Only [`required`] rejects `NULL`. The shape checks let a missing value through so an
//! optional column can carry them; stack `required()` in front to make the column
//! mandatory.
//!
//! ```
//! use buoy::{validators, Column, DataType};
//!
//! let name = Column::new("NAME", "name", DataType::Varchar)
//!     .validator(validators::required())
//!     .validator(validators::max_length(20));
//! assert_eq!(name.validators().len(), 2);
//! ```

use crate::value::Value;
use std::fmt;
use std::sync::Arc;

type CheckFn = dyn Fn(&Value) -> Result<(), String> + Send + Sync;

/// A named validation function.
#[derive(Clone)]
pub struct Validator {
    name: String,
    check: Arc<CheckFn>,
}

impl Validator {
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the check, returning the failure message on rejection.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        (self.check)(value)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator").field("name", &self.name).finish()
    }
}

/// Rejects `NULL` and the empty string. Whitespace-only text is accepted.
pub fn required() -> Validator {
    Validator::new("required", |value| match value {
        Value::Null => Err("Value cannot be null.".to_string()),
        Value::Text(s) if s.is_empty() => Err("Value cannot be blank.".to_string()),
        _ => Ok(()),
    })
}

/// Requires text of at most `length` characters. `NULL` passes.
pub fn max_length(length: usize) -> Validator {
    Validator::new(format!("max_length({length})"), move |value| match value {
        Value::Null => Ok(()),
        Value::Text(s) if s.chars().count() > length => {
            Err(format!("can not be more than {length} characters."))
        }
        Value::Text(_) => Ok(()),
        _ => Err("should be a string.".to_string()),
    })
}

/// Requires a number (or numeric text) with at most `digits` fractional digits.
/// `NULL` passes.
pub fn max_decimal_digits(digits: usize) -> Validator {
    Validator::new(format!("max_decimal_digits({digits})"), move |value| {
        let text = match value {
            Value::Null => return Ok(()),
            Value::Int(_) => return Ok(()),
            Value::Double(v) if v.is_finite() => v.to_string(),
            Value::Double(_) => return Err("should be a valid number.".to_string()),
            Value::Text(s) => s.trim().to_string(),
            _ => return Err("should be either number or string.".to_string()),
        };
        if text.parse::<f64>().is_err() {
            return Err("should be a valid number.".to_string());
        }
        let fraction = text.split_once('.').map_or(0, |(_, frac)| frac.len());
        if fraction > digits {
            return Err(format!("can not have more than {digits} decimal digits."));
        }
        Ok(())
    })
}
