use model::core::value::Value;
use thiserror::Error;

/// All errors coming from the database/query layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// A requested column is not part of the table's schema.
    #[error("Unknown column `{column}` on table `{table}`")]
    UnknownColumn { table: String, column: String },

    /// The schema lookup returned no columns for the table.
    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Table `{0}` has no primary key")]
    MissingPrimaryKey(String),

    #[error("Table `{table}` has a composite primary key ({}); a single key column is required", columns.join(", "))]
    CompositePrimaryKey { table: String, columns: Vec<String> },

    #[error("Duplicate primary key {key} in table `{table}`")]
    DuplicateKey { table: String, key: Value },

    /// A row did not match the shape of the table it was written to.
    #[error("Invalid row: {0}")]
    InvalidRow(String),

    /// A value read from the database could not be converted.
    #[error("Failed to decode column `{column}`: {message}")]
    Decode { column: String, message: String },

    /// A parameter does not fit the column it is compared against.
    #[error("Parameter out of range: {0}")]
    ParamOutOfRange(String),

    #[error("Postgres error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("MySQL error: {0}")]
    MySql(#[from] mysql_async::Error),
}

impl DbError {
    pub fn unknown_column(table: &str, column: &str) -> Self {
        DbError::UnknownColumn {
            table: table.to_string(),
            column: column.to_string(),
        }
    }

    pub fn decode(column: &str, message: impl Into<String>) -> Self {
        DbError::Decode {
            column: column.to_string(),
            message: message.into(),
        }
    }
}

/// Errors happening during adapter or connection setup.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Invalid connection URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported database: {0}")]
    UnsupportedDatabase(String),

    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),

    #[error("Postgres connection failed: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("MySQL connection failed: {0}")]
    MySql(#[from] mysql_async::Error),

    #[error("Failed to load table metadata: {0}")]
    Metadata(#[from] DbError),
}
