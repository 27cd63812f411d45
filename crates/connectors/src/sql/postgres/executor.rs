use crate::{
    error::{ConnectorError, DbError},
    executor::{QueryExecutor, RangeQuery},
    metadata::{column::ColumnMetadata, table::TableMetadata},
    sql::{
        base::query::generator::QueryGenerator,
        postgres::{params::PgParamStore, row::decode_row, utils::connect_client},
    },
};
use async_trait::async_trait;
use model::{core::data_type::DataType, records::row::Row};
use planner::query::{ast::common::TableRef, dialect::Postgres};
use std::time::Instant;
use tokio_postgres::Client;
use tracing::{debug, info};

const TABLE_METADATA_QUERY: &str = include_str!("sql/table_metadata.sql");
const DEFAULT_SCHEMA: &str = "public";

/// Range queries over one PostgreSQL table.
pub struct PgExecutor {
    client: Client,
    metadata: TableMetadata,
}

impl PgExecutor {
    /// Connects and loads the schema of `table` (`name` or `schema.name`).
    pub async fn connect(url: &str, table: &str) -> Result<Self, ConnectorError> {
        let client = connect_client(url).await?;
        Ok(Self::from_client(client, table).await?)
    }

    pub async fn from_client(client: Client, table: &str) -> Result<Self, DbError> {
        let table = TableRef::parse(table);
        let metadata = Self::load_metadata(&client, table).await?;
        info!(
            table = %metadata.name(),
            columns = metadata.columns.len(),
            "Loaded Postgres table metadata"
        );
        Ok(PgExecutor { client, metadata })
    }

    async fn load_metadata(client: &Client, table: TableRef) -> Result<TableMetadata, DbError> {
        let schema = table.schema.as_deref().unwrap_or(DEFAULT_SCHEMA);
        let rows = client
            .query(TABLE_METADATA_QUERY, &[&schema, &table.name])
            .await?;

        let columns = rows
            .iter()
            .map(|row| -> Result<ColumnMetadata, tokio_postgres::Error> {
                let name: String = row.try_get("column_name")?;
                let ordinal: i32 = row.try_get("ordinal")?;
                let data_type: String = row.try_get("data_type")?;
                let is_nullable: bool = row.try_get("is_nullable")?;
                let is_primary_key: bool = row.try_get("is_primary_key")?;

                Ok(ColumnMetadata {
                    name,
                    ordinal: usize::try_from(ordinal).unwrap_or_default(),
                    data_type: DataType::from_postgres_type(&data_type),
                    is_nullable,
                    is_primary_key,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        TableMetadata::from_columns(table, columns)
    }
}

#[async_trait]
impl QueryExecutor for PgExecutor {
    fn table(&self) -> &TableMetadata {
        &self.metadata
    }

    async fn run_range_query(&self, query: &RangeQuery) -> Result<Vec<Row>, DbError> {
        let start = Instant::now();
        let (sql, params) = QueryGenerator::new(&Postgres).range_select(&self.metadata.table, query);

        let statement = self.client.prepare(&sql).await?;
        let store = PgParamStore::typed(params, statement.params())?;
        let rows = self.client.query(&statement, &store.as_refs()).await?;

        let decoded = rows
            .iter()
            .map(|row| decode_row(row, &query.columns))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            table = %self.metadata.name(),
            rows = decoded.len(),
            took_ms = start.elapsed().as_millis() as u64,
            "Postgres range query finished"
        );
        Ok(decoded)
    }
}
