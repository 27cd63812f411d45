#![allow(dead_code)]

use super::{mysql_pool, pg_client};
use engine_core::{
    batch::{iterator::KeysetBatchIterator, summary::IterationSummary},
    error::PluckError,
};
use connectors::executor::QueryExecutor;
use model::records::row::Plucked;
use mysql_async::prelude::Queryable;
use std::convert::Infallible;

/// Users table keyed by a 32-bit integer, seeded with ids `1..=n`.
pub const PG_USERS_TABLE_DDL: &str = r#"CREATE TABLE pluck_users (
  id INTEGER PRIMARY KEY,
  name VARCHAR(45) NOT NULL,
  email TEXT,
  created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);"#;

/// Smallint key, used to hit the top of the key range.
pub const PG_COUNTERS_TABLE_DDL: &str = r#"CREATE TABLE pluck_counters (
  id SMALLINT PRIMARY KEY,
  hits BIGINT NOT NULL
);"#;

/// Text key, which cannot drive a keyset scan.
pub const PG_TOKENS_TABLE_DDL: &str = r#"CREATE TABLE pluck_tokens (
  token TEXT PRIMARY KEY,
  owner TEXT NOT NULL
);"#;

pub const MYSQL_USERS_TABLE_DDL: &str = r#"CREATE TABLE pluck_users (
  id INT UNSIGNED NOT NULL PRIMARY KEY,
  name VARCHAR(45) NOT NULL,
  balance DECIMAL(10, 2) NULL,
  last_update DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
);"#;

pub async fn seed_pg_users(ids: impl IntoIterator<Item = i32>) {
    let client = pg_client().await;
    for id in ids {
        client
            .execute(
                "INSERT INTO pluck_users (id, name, email) VALUES ($1, $2, $3)",
                &[&id, &format!("user{id}"), &format!("user{id}@example.com")],
            )
            .await
            .expect("insert user");
    }
}

pub async fn seed_pg_series(from: i32, to: i32) {
    let client = pg_client().await;
    client
        .execute(
            "INSERT INTO pluck_users (id, name, email)
             SELECT g, 'user' || g, 'user' || g || '@example.com'
             FROM generate_series($1::int4, $2::int4) AS g",
            &[&from, &to],
        )
        .await
        .expect("seed users");
}

pub async fn seed_mysql_users(ids: impl IntoIterator<Item = u32>) {
    let pool = mysql_pool();
    let mut conn = pool.get_conn().await.expect("mysql connection");
    let rows = ids
        .into_iter()
        .map(|id| format!("({id}, 'user{id}', {id}.50)"))
        .collect::<Vec<_>>();
    conn.query_drop(format!(
        "INSERT INTO pluck_users (id, name, balance) VALUES {}",
        rows.join(", ")
    ))
    .await
    .expect("seed mysql users");
    drop(conn);
    pool.disconnect().await.ok();
}

/// Runs a scan and collects everything delivered.
pub async fn pluck_all<E: QueryExecutor + ?Sized>(
    executor: &E,
    columns: &[&str],
    batch_size: usize,
) -> (Vec<Plucked>, Result<IterationSummary, PluckError>) {
    let mut rows = Vec::new();
    let result = KeysetBatchIterator::new(executor)
        .iterate(columns, batch_size, |row| {
            rows.push(row);
            Ok::<_, Infallible>(())
        })
        .await;
    (rows, result)
}
