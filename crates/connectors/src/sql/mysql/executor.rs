use crate::{
    error::{ConnectorError, DbError},
    executor::{QueryExecutor, RangeQuery},
    metadata::{column::ColumnMetadata, table::TableMetadata},
    sql::{
        base::query::generator::QueryGenerator,
        mysql::{params::MySqlParamStore, row::decode_row},
    },
};
use async_trait::async_trait;
use model::{core::data_type::DataType, records::row::Row};
use mysql_async::{Opts, Pool, Row as MySqlRow, prelude::Queryable};
use planner::query::{ast::common::TableRef, dialect::MySql};
use std::time::Instant;
use tracing::{debug, error, info};

const TABLE_METADATA_QUERY: &str = include_str!("sql/table_metadata.sql");

/// Range queries over one MySQL/MariaDB table. Without an explicit schema the
/// connection's default database is used.
pub struct MySqlExecutor {
    pool: Pool,
    metadata: TableMetadata,
}

impl MySqlExecutor {
    pub async fn connect(url: &str, table: &str) -> Result<Self, ConnectorError> {
        let opts = Opts::from_url(url).map_err(|e| {
            error!("MySQL connection string parse failed: {}", e);
            ConnectorError::InvalidUrl(e.to_string())
        })?;
        Ok(Self::from_pool(Pool::new(opts), table).await?)
    }

    pub async fn from_pool(pool: Pool, table: &str) -> Result<Self, DbError> {
        let table = TableRef::parse(table);
        let metadata = Self::load_metadata(&pool, table).await?;
        info!(
            table = %metadata.name(),
            columns = metadata.columns.len(),
            "Loaded MySQL table metadata"
        );
        Ok(MySqlExecutor { pool, metadata })
    }

    pub async fn disconnect(self) -> Result<(), DbError> {
        self.pool.disconnect().await?;
        Ok(())
    }

    async fn load_metadata(pool: &Pool, table: TableRef) -> Result<TableMetadata, DbError> {
        let mut conn = pool.get_conn().await?;
        let rows = conn
            .exec::<(String, u64, String, bool, bool), _, _>(
                TABLE_METADATA_QUERY,
                (table.schema.clone(), table.name.clone()),
            )
            .await?;

        let columns = rows
            .into_iter()
            .map(
                |(name, ordinal, data_type, is_nullable, is_primary_key)| ColumnMetadata {
                    name,
                    ordinal: usize::try_from(ordinal).unwrap_or_default(),
                    data_type: DataType::from_mysql_type(&data_type),
                    is_nullable,
                    is_primary_key,
                },
            )
            .collect();

        TableMetadata::from_columns(table, columns)
    }
}

#[async_trait]
impl QueryExecutor for MySqlExecutor {
    fn table(&self) -> &TableMetadata {
        &self.metadata
    }

    async fn run_range_query(&self, query: &RangeQuery) -> Result<Vec<Row>, DbError> {
        let start = Instant::now();
        let (sql, params) = QueryGenerator::new(&MySql).range_select(&self.metadata.table, query);
        let store = MySqlParamStore::from_values(&params);

        let mut conn = self.pool.get_conn().await?;
        let rows = conn.exec::<MySqlRow, _, _>(sql, store.params()).await?;

        let decoded = rows
            .into_iter()
            .map(|row| decode_row(row, &query.columns))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            table = %self.metadata.name(),
            rows = decoded.len(),
            took_ms = start.elapsed().as_millis() as u64,
            "MySQL range query finished"
        );
        Ok(decoded)
    }
}
