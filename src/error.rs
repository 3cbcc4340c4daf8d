//! Error types for query building, execution and materialization.

use crate::executor::{BackendError, RowId};
use crate::value::ConvertError;
use std::fmt;

/// Errors raised by the query layer.
///
/// Compile-time failures (`UnknownField`) are returned before any adapter call.
/// Adapter failures are carried unmodified in `Backend`.
#[derive(Debug)]
pub enum BuoyError {
    /// A property named in a projection, condition or sort is not in the column registry
    UnknownField { table: String, field: String },
    /// `find_by_id` found no row with the given identifier
    EntityNotFound { table: String, id: RowId },
    /// The schema declaration is malformed
    SchemaConfiguration(String),
    /// A column validator rejected a value
    Validation { property: String, message: String },
    /// A value could not be assigned to a model property
    Conversion {
        property: String,
        source: ConvertError,
    },
    /// Failure reported by the execution adapter
    Backend(BackendError),
}

impl BuoyError {
    pub(crate) fn schema(message: impl Into<String>) -> Self {
        BuoyError::SchemaConfiguration(message.into())
    }

    /// True for [`BuoyError::EntityNotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, BuoyError::EntityNotFound { .. })
    }
}

impl fmt::Display for BuoyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuoyError::UnknownField { table, field } => {
                write!(f, "Unknown field `{field}` for table {table}")
            }
            BuoyError::EntityNotFound { table, id } => {
                write!(f, "No row with id {id} in table {table}")
            }
            BuoyError::SchemaConfiguration(msg) => {
                write!(f, "Schema configuration error: {msg}")
            }
            BuoyError::Validation { property, message } => {
                write!(f, "Validation failed for `{property}`: {message}")
            }
            BuoyError::Conversion { property, source } => {
                write!(f, "Cannot assign `{property}`: {source}")
            }
            BuoyError::Backend(e) => {
                write!(f, "Backend error: {e}")
            }
        }
    }
}

impl std::error::Error for BuoyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuoyError::Conversion { source, .. } => Some(source),
            BuoyError::Backend(e) => Some(&**e),
            _ => None,
        }
    }
}

impl From<BackendError> for BuoyError {
    fn from(err: BackendError) -> Self {
        BuoyError::Backend(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_formats() {
        let err = BuoyError::UnknownField {
            table: "Users".into(),
            field: "nope".into(),
        };
        assert_eq!(err.to_string(), "Unknown field `nope` for table Users");

        let err = BuoyError::EntityNotFound {
            table: "Users".into(),
            id: RowId::Number(7),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "No row with id 7 in table Users");
    }

    #[test]
    fn test_backend_error_is_passed_through() {
        let inner: BackendError = Box::new(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            "gateway timeout",
        ));
        let err = BuoyError::from(inner);
        let source = err.source().unwrap();
        let io = source.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io.kind(), std::io::ErrorKind::TimedOut);
    }
}
