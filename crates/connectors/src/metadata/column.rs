use model::core::{column::ColumnRef, data_type::DataType};

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMetadata {
    pub name: String,
    pub ordinal: usize,
    pub data_type: DataType,
    pub is_nullable: bool,
    pub is_primary_key: bool,
}

impl ColumnMetadata {
    pub fn new(name: &str, ordinal: usize, data_type: DataType) -> Self {
        ColumnMetadata {
            name: name.to_string(),
            ordinal,
            data_type,
            is_nullable: true,
            is_primary_key: false,
        }
    }

    /// Marks the column as the table's primary key; key columns are never nullable.
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self.is_nullable = false;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.is_nullable = false;
        self
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn to_ref(&self, table: &str) -> ColumnRef {
        ColumnRef::new(table, &self.name, self.data_type.clone())
    }
}
