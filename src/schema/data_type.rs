//! Datastore column types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column types supported by the datastore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataType {
    /// Short text, up to 65535 characters
    Text,
    /// Variable character data, up to 255 characters
    Varchar,
    Date,
    DateTime,
    Int,
    Double,
    Boolean,
    BigInt,
    /// Reference to another table's `ROWID`
    ForeignKey,
    /// Text stored encrypted at rest
    EncryptedText,
}

impl DataType {
    /// The datastore's name for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Text => "text",
            DataType::Varchar => "varchar",
            DataType::Date => "date",
            DataType::DateTime => "dateTime",
            DataType::Int => "int",
            DataType::Double => "double",
            DataType::Boolean => "boolean",
            DataType::BigInt => "bigint",
            DataType::ForeignKey => "foreign key",
            DataType::EncryptedText => "Encrypted text",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
