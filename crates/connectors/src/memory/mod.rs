//! An in-memory table that answers range queries the same way the SQL
//! executors do. Writes may interleave with a running scan.

use crate::{
    error::DbError,
    executor::{QueryExecutor, RangeQuery},
    metadata::table::TableMetadata,
};
use async_trait::async_trait;
use model::{
    core::{column::ColumnRef, value::Value},
    records::row::Row,
};
use std::cmp::Ordering;
use tokio::sync::RwLock;
use tracing::trace;

#[derive(Debug)]
pub struct MemoryTable {
    metadata: TableMetadata,
    pk: ColumnRef,
    pk_index: usize,
    // Always sorted ascending by the primary key.
    rows: RwLock<Vec<Row>>,
}

impl MemoryTable {
    pub fn new(metadata: TableMetadata) -> Result<Self, DbError> {
        let pk = metadata.primary_key()?;
        let pk_index = metadata
            .position(&pk.name)
            .ok_or_else(|| DbError::MissingPrimaryKey(metadata.name().to_string()))?;

        Ok(MemoryTable {
            metadata,
            pk,
            pk_index,
            rows: RwLock::new(Vec::new()),
        })
    }

    /// Builds a table from rows given in column ordinal order, in any key order.
    pub fn with_rows(metadata: TableMetadata, rows: Vec<Row>) -> Result<Self, DbError> {
        let mut table = Self::new(metadata)?;
        for row in &rows {
            table.check_row(row)?;
        }

        let mut rows = rows;
        rows.sort_by(|a, b| table.cmp_keys(a, b));
        if let Some(pair) = rows
            .windows(2)
            .find(|pair| table.cmp_keys(&pair[0], &pair[1]) == Ordering::Equal)
        {
            return Err(DbError::DuplicateKey {
                table: table.metadata.name().to_string(),
                key: table.key_of(&pair[1]).clone(),
            });
        }

        table.rows = RwLock::new(rows);
        Ok(table)
    }

    pub fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }

    pub async fn insert(&self, row: Row) -> Result<(), DbError> {
        let key = self.check_row(&row)?.clone();
        let mut rows = self.rows.write().await;
        let idx = rows.partition_point(|r| self.key_of(r).compare(&key) == Some(Ordering::Less));

        if rows.get(idx).is_some_and(|r| self.key_of(r).equal(&key)) {
            return Err(DbError::DuplicateKey {
                table: self.metadata.name().to_string(),
                key,
            });
        }

        rows.insert(idx, row);
        Ok(())
    }

    /// Removes the row with the given key. Returns whether a row was removed.
    pub async fn delete(&self, key: impl Into<Value>) -> bool {
        let key = key.into();
        let mut rows = self.rows.write().await;
        match rows.iter().position(|r| self.key_of(r).equal(&key)) {
            Some(idx) => {
                rows.remove(idx);
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    fn key_of<'r>(&self, row: &'r Row) -> &'r Value {
        row.get(self.pk_index).unwrap_or(&Value::Null)
    }

    fn cmp_keys(&self, a: &Row, b: &Row) -> Ordering {
        self.key_of(a)
            .compare(self.key_of(b))
            .unwrap_or(Ordering::Equal)
    }

    fn check_row<'r>(&self, row: &'r Row) -> Result<&'r Value, DbError> {
        if row.len() != self.metadata.columns.len() {
            return Err(DbError::InvalidRow(format!(
                "expected {} values for `{}`, got {}",
                self.metadata.columns.len(),
                self.metadata.name(),
                row.len()
            )));
        }

        let key = self.key_of(row);
        if key.is_null() {
            return Err(DbError::InvalidRow(format!(
                "primary key `{}` cannot be NULL",
                self.pk.name
            )));
        }
        if self.pk.data_type.is_integer() && !self.pk.data_type.contains_key(key) {
            return Err(DbError::ParamOutOfRange(format!(
                "{key} does not fit `{}` ({})",
                self.pk.name, self.pk.data_type
            )));
        }

        Ok(key)
    }

    fn projection(&self, columns: &[ColumnRef]) -> Result<Vec<usize>, DbError> {
        columns
            .iter()
            .map(|col| {
                self.metadata
                    .position(&col.name)
                    .ok_or_else(|| DbError::unknown_column(self.metadata.name(), &col.name))
            })
            .collect()
    }
}

#[async_trait]
impl QueryExecutor for MemoryTable {
    fn table(&self) -> &TableMetadata {
        &self.metadata
    }

    async fn run_range_query(&self, query: &RangeQuery) -> Result<Vec<Row>, DbError> {
        let projection = self.projection(&query.columns)?;
        let rows = self.rows.read().await;

        let start = rows.partition_point(|r| {
            self.key_of(r).compare(&query.lower_bound) == Some(Ordering::Less)
        });

        let page = rows[start..]
            .iter()
            .take(query.limit)
            .map(|row| {
                Row::new(
                    projection
                        .iter()
                        .map(|&idx| row.get(idx).cloned().unwrap_or(Value::Null))
                        .collect(),
                )
            })
            .collect::<Vec<_>>();

        trace!(
            table = %self.metadata.name(),
            from = %query.lower_bound,
            limit = query.limit,
            returned = page.len(),
            "Memory range query"
        );

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{executor::RangeQueryBuilder, metadata::column::ColumnMetadata};
    use model::core::data_type::DataType;
    use planner::query::ast::common::TableRef;

    fn metadata() -> TableMetadata {
        TableMetadata::from_columns(
            TableRef::parse("users"),
            vec![
                ColumnMetadata::new("id", 0, DataType::Int).primary_key(),
                ColumnMetadata::new("name", 1, DataType::VarChar),
            ],
        )
        .unwrap()
    }

    fn user(id: i64) -> Row {
        Row::new(vec![Value::Int(id), Value::String(format!("user{id}"))])
    }

    fn query(table: &MemoryTable, columns: &[&str], from: i64, limit: usize) -> RangeQuery {
        RangeQueryBuilder::new(table.primary_key().unwrap())
            .columns(
                columns
                    .iter()
                    .map(|name| table.resolve_column(name).unwrap())
                    .collect(),
            )
            .lower_bound(Value::Int(from))
            .limit(limit)
            .build()
    }

    #[tokio::test]
    async fn test_with_rows_sorts_by_key() {
        let table = MemoryTable::with_rows(metadata(), vec![user(3), user(1), user(2)]).unwrap();
        let rows = table
            .run_range_query(&query(&table, &["id"], i64::MIN, 10))
            .await
            .unwrap();

        let ids = rows.into_iter().map(|r| r.values[0].clone()).collect::<Vec<_>>();
        assert_eq!(ids, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[tokio::test]
    async fn test_range_query_is_inclusive_and_limited() {
        let table = MemoryTable::with_rows(metadata(), (1..=10).map(user).collect()).unwrap();
        let rows = table
            .run_range_query(&query(&table, &["name", "id"], 4, 3))
            .await
            .unwrap();

        assert_eq!(
            rows,
            vec![
                Row::new(vec![Value::from("user4"), Value::Int(4)]),
                Row::new(vec![Value::from("user5"), Value::Int(5)]),
                Row::new(vec![Value::from("user6"), Value::Int(6)]),
            ]
        );
    }

    #[tokio::test]
    async fn test_range_query_past_last_key_is_empty() {
        let table = MemoryTable::with_rows(metadata(), (1..=3).map(user).collect()).unwrap();
        let rows = table
            .run_range_query(&query(&table, &["id"], 4, 3))
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_keys_rejected() {
        let err = MemoryTable::with_rows(metadata(), vec![user(1), user(1)]).unwrap_err();
        assert!(matches!(err, DbError::DuplicateKey { key: Value::Int(1), .. }));

        let table = MemoryTable::with_rows(metadata(), vec![user(1)]).unwrap();
        assert!(matches!(
            table.insert(user(1)).await,
            Err(DbError::DuplicateKey { .. })
        ));
    }

    #[tokio::test]
    async fn test_insert_and_delete_keep_order() {
        let table = MemoryTable::with_rows(metadata(), vec![user(1), user(5)]).unwrap();
        table.insert(user(3)).await.unwrap();
        assert!(table.delete(1i64).await);
        assert!(!table.delete(42i64).await);
        assert_eq!(table.len().await, 2);

        let rows = table
            .run_range_query(&query(&table, &["id"], 0, 10))
            .await
            .unwrap();
        assert_eq!(
            rows,
            vec![Row::new(vec![Value::Int(3)]), Row::new(vec![Value::Int(5)])]
        );
    }

    #[tokio::test]
    async fn test_invalid_rows_rejected() {
        let table = MemoryTable::new(metadata()).unwrap();
        assert!(table.is_empty().await);

        let short = table.insert(Row::new(vec![Value::Int(1)])).await;
        assert!(matches!(short, Err(DbError::InvalidRow(_))));

        let null_key = table
            .insert(Row::new(vec![Value::Null, Value::from("x")]))
            .await;
        assert!(matches!(null_key, Err(DbError::InvalidRow(_))));

        let too_big = table
            .insert(Row::new(vec![Value::Int(i64::from(i32::MAX) + 1), Value::Null]))
            .await;
        assert!(matches!(too_big, Err(DbError::ParamOutOfRange(_))));
    }

    #[test]
    fn test_table_without_primary_key_rejected() {
        let meta = TableMetadata::from_columns(
            TableRef::parse("logs"),
            vec![ColumnMetadata::new("line", 0, DataType::String)],
        )
        .unwrap();
        assert!(matches!(
            MemoryTable::new(meta),
            Err(DbError::MissingPrimaryKey(_))
        ));
    }
}
