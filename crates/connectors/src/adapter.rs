use crate::{
    error::ConnectorError,
    executor::QueryExecutor,
    sql::{mysql::executor::MySqlExecutor, postgres::executor::PgExecutor},
};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    MySql,
    Postgres,
}

impl FromStr for DatabaseKind {
    type Err = ConnectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(DatabaseKind::MySql),
            "pg" | "postgres" | "postgresql" => Ok(DatabaseKind::Postgres),
            other => Err(ConnectorError::UnsupportedDatabase(other.to_string())),
        }
    }
}

impl DatabaseKind {
    /// Infers the database from a connection URL's scheme.
    pub fn from_url(url: &str) -> Result<Self, ConnectorError> {
        let (scheme, _) = url
            .split_once("://")
            .ok_or_else(|| ConnectorError::InvalidUrl(format!("missing scheme in `{url}`")))?;
        scheme.parse()
    }
}

pub enum Adapter {
    MySql(MySqlExecutor),
    Postgres(PgExecutor),
}

impl Adapter {
    /// Connects to `url` and loads the schema of `table`.
    pub async fn connect(url: &str, table: &str) -> Result<Self, ConnectorError> {
        match DatabaseKind::from_url(url)? {
            DatabaseKind::MySql => Ok(Adapter::MySql(MySqlExecutor::connect(url, table).await?)),
            DatabaseKind::Postgres => {
                Ok(Adapter::Postgres(PgExecutor::connect(url, table).await?))
            }
        }
    }

    pub fn kind(&self) -> DatabaseKind {
        match self {
            Adapter::MySql(_) => DatabaseKind::MySql,
            Adapter::Postgres(_) => DatabaseKind::Postgres,
        }
    }

    pub fn executor(&self) -> &dyn QueryExecutor {
        match self {
            Adapter::MySql(executor) => executor,
            Adapter::Postgres(executor) => executor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_url_scheme() {
        assert_eq!(
            DatabaseKind::from_url("postgres://u:p@localhost/db").unwrap(),
            DatabaseKind::Postgres
        );
        assert_eq!(
            DatabaseKind::from_url("postgresql://localhost/db").unwrap(),
            DatabaseKind::Postgres
        );
        assert_eq!(
            DatabaseKind::from_url("mysql://root@localhost:3306/app").unwrap(),
            DatabaseKind::MySql
        );
    }

    #[test]
    fn test_unknown_scheme_rejected() {
        assert!(matches!(
            DatabaseKind::from_url("sqlite://file.db"),
            Err(ConnectorError::UnsupportedDatabase(s)) if s == "sqlite"
        ));
        assert!(matches!(
            DatabaseKind::from_url("localhost/db"),
            Err(ConnectorError::InvalidUrl(_))
        ));
    }
}
