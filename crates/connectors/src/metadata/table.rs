use crate::{error::DbError, metadata::column::ColumnMetadata};
use model::core::column::ColumnRef;
use planner::query::ast::common::TableRef;

/// Schema of a single table: the column-type registry that requested names
/// are resolved against.
#[derive(Debug, Clone, PartialEq)]
pub struct TableMetadata {
    pub table: TableRef,
    pub columns: Vec<ColumnMetadata>,
}

impl TableMetadata {
    /// Columns are kept in ordinal order. An empty column list means the
    /// table does not exist.
    pub fn from_columns(
        table: TableRef,
        mut columns: Vec<ColumnMetadata>,
    ) -> Result<Self, DbError> {
        if columns.is_empty() {
            return Err(DbError::TableNotFound(qualified_name(&table)));
        }

        columns.sort_by_key(|col| col.ordinal);
        Ok(TableMetadata { table, columns })
    }

    pub fn name(&self) -> &str {
        &self.table.name
    }

    pub fn column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|col| col.is_named(name))
    }

    /// Position of the column in the table's ordinal order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col.is_named(name))
    }

    pub fn resolve(&self, name: &str) -> Result<ColumnRef, DbError> {
        self.column(name)
            .map(|col| col.to_ref(self.name()))
            .ok_or_else(|| DbError::unknown_column(self.name(), name))
    }

    /// The single primary-key column; composite keys cannot drive a keyset scan.
    pub fn primary_key(&self) -> Result<ColumnRef, DbError> {
        let keys = self
            .columns
            .iter()
            .filter(|col| col.is_primary_key)
            .collect::<Vec<_>>();

        match keys.as_slice() {
            [] => Err(DbError::MissingPrimaryKey(self.name().to_string())),
            [pk] => Ok(pk.to_ref(self.name())),
            _ => Err(DbError::CompositePrimaryKey {
                table: self.name().to_string(),
                columns: keys.iter().map(|col| col.name.clone()).collect(),
            }),
        }
    }
}

fn qualified_name(table: &TableRef) -> String {
    match &table.schema {
        Some(schema) => format!("{schema}.{}", table.name),
        None => table.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::data_type::DataType;

    fn users() -> TableMetadata {
        TableMetadata::from_columns(
            TableRef::parse("users"),
            vec![
                ColumnMetadata::new("name", 1, DataType::VarChar),
                ColumnMetadata::new("id", 0, DataType::Long).primary_key(),
                ColumnMetadata::new("email", 2, DataType::VarChar).not_null(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_columns_sorted_by_ordinal() {
        let table = users();
        let names: Vec<_> = table.columns.iter().map(|col| col.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name", "email"]);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let meta = users();
        let col = meta.resolve("EMAIL").unwrap();
        assert_eq!(col.name, "email");
        assert_eq!(col.table, "users");
        assert_eq!(col.data_type, DataType::VarChar);
    }

    #[test]
    fn test_resolve_unknown_column() {
        let err = users().resolve("nope").unwrap_err();
        assert!(matches!(
            err,
            DbError::UnknownColumn { ref table, ref column } if table == "users" && column == "nope"
        ));
    }

    #[test]
    fn test_primary_key_lookup() {
        let pk = users().primary_key().unwrap();
        assert_eq!(pk.name, "id");
        assert_eq!(pk.data_type, DataType::Long);
    }

    #[test]
    fn test_missing_and_composite_primary_keys() {
        let no_pk = TableMetadata::from_columns(
            TableRef::parse("logs"),
            vec![ColumnMetadata::new("line", 0, DataType::String)],
        )
        .unwrap();
        assert!(matches!(no_pk.primary_key(), Err(DbError::MissingPrimaryKey(t)) if t == "logs"));

        let composite = TableMetadata::from_columns(
            TableRef::parse("pairs"),
            vec![
                ColumnMetadata::new("a", 0, DataType::Int).primary_key(),
                ColumnMetadata::new("b", 1, DataType::Int).primary_key(),
            ],
        )
        .unwrap();
        assert!(matches!(
            composite.primary_key(),
            Err(DbError::CompositePrimaryKey { columns, .. }) if columns == vec!["a", "b"]
        ));
    }

    #[test]
    fn test_empty_schema_is_table_not_found() {
        let err = TableMetadata::from_columns(TableRef::parse("app.ghost"), vec![]).unwrap_err();
        assert!(matches!(err, DbError::TableNotFound(name) if name == "app.ghost"));
    }
}
