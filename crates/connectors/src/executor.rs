use crate::{error::DbError, metadata::table::TableMetadata};
use async_trait::async_trait;
use model::{
    core::{column::ColumnRef, value::Value},
    pagination::cursor::Cursor,
    records::row::Row,
};

/// Runs bounded, key-ordered range queries against one table.
///
/// Implementations resolve names against their table's schema and return
/// rows whose values line up with `RangeQuery::columns`, ordered ascending
/// by the primary key.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    fn table(&self) -> &TableMetadata;

    fn resolve_column(&self, name: &str) -> Result<ColumnRef, DbError> {
        self.table().resolve(name)
    }

    fn primary_key(&self) -> Result<ColumnRef, DbError> {
        self.table().primary_key()
    }

    /// `SELECT columns WHERE pk >= lower_bound ORDER BY pk ASC LIMIT limit`
    async fn run_range_query(&self, query: &RangeQuery) -> Result<Vec<Row>, DbError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeQuery {
    pub columns: Vec<ColumnRef>,
    pub primary_key: ColumnRef,
    pub lower_bound: Value,
    pub limit: usize,
}

impl RangeQuery {
    pub fn cursor(&self) -> Cursor {
        Cursor::Pk {
            pk_col: self.primary_key.name.clone(),
            from: self.lower_bound.clone(),
        }
    }
}

pub struct RangeQueryBuilder {
    columns: Vec<ColumnRef>,
    primary_key: ColumnRef,
    lower_bound: Value,
    limit: usize,
}

impl RangeQueryBuilder {
    pub fn new(primary_key: ColumnRef) -> Self {
        RangeQueryBuilder {
            columns: Vec::new(),
            primary_key,
            lower_bound: Value::Null,
            limit: 0,
        }
    }

    pub fn columns(mut self, columns: Vec<ColumnRef>) -> Self {
        self.columns = columns;
        self
    }

    pub fn lower_bound(mut self, lower_bound: Value) -> Self {
        self.lower_bound = lower_bound;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn build(self) -> RangeQuery {
        RangeQuery {
            columns: self.columns,
            primary_key: self.primary_key,
            lower_bound: self.lower_bound,
            limit: self.limit,
        }
    }
}
