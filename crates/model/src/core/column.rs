use crate::core::data_type::DataType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A column that has been resolved against a table's schema.
///
/// Only schema lookups hand these out, so holding one means the column exists
/// and its type is known.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    pub table: String,
    pub name: String,
    pub data_type: DataType,
}

impl ColumnRef {
    pub fn new(table: &str, name: &str, data_type: DataType) -> Self {
        ColumnRef {
            table: table.to_string(),
            name: name.to_string(),
            data_type,
        }
    }

    /// Column names compare case-insensitively, as both supported databases do
    /// for unquoted identifiers.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn same_column(&self, other: &ColumnRef) -> bool {
        self.table.eq_ignore_ascii_case(&other.table) && self.is_named(&other.name)
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.name)
    }
}
