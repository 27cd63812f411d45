use crate::query::{
    ast::{common::OrderDir, expr::BinaryOperator, expr::Expr},
    builder::select::{FromState, SelectBuilder},
    ident, value,
};
use model::{core::value::Value, pagination::cursor::Cursor};
use tracing::trace;

pub trait OffsetStrategy: Send + Sync {
    /// Applies the pagination logic (WHERE, ORDER BY and LIMIT) to a SelectBuilder.
    fn apply_to_builder(
        &self,
        builder: SelectBuilder<FromState>,
        cursor: &Cursor,
        limit: usize,
    ) -> SelectBuilder<FromState>;

    /// Generates the cursor for the page after the one ending at `last_key`.
    /// `None` means no later page can exist.
    fn next_cursor(&self, last_key: &Value) -> Option<Cursor>;
}

/// Keyset pagination over a strictly increasing integer primary key.
///
/// Each page is `pk >= start ORDER BY pk ASC LIMIT n`, and the next page starts
/// at the successor of the last key seen, so gaps in the key sequence are
/// skipped without extra queries.
#[derive(Debug, Clone)]
pub struct PkOffset {
    pub pk: String,
}

impl PkOffset {
    pub fn new(pk: &str) -> Self {
        PkOffset { pk: pk.to_string() }
    }
}

impl OffsetStrategy for PkOffset {
    fn apply_to_builder(
        &self,
        mut builder: SelectBuilder<FromState>,
        cursor: &Cursor,
        limit: usize,
    ) -> SelectBuilder<FromState> {
        // WHERE pk >= ?
        if let Some(from) = cursor.lower_bound() {
            trace!(pk = %self.pk, %from, "Applying keyset lower bound");
            builder = builder.where_clause(Expr::binary(
                ident(&self.pk),
                BinaryOperator::GtEq,
                value(from.clone()),
            ));
        }

        // If Cursor::None, the first page has no lower bound.

        // ORDER BY pk ASC
        builder = builder.order_by(ident(&self.pk), Some(OrderDir::Asc));

        // LIMIT ?, saturated to the widest value the databases accept
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        builder.limit(value(Value::Int(limit)))
    }

    fn next_cursor(&self, last_key: &Value) -> Option<Cursor> {
        last_key.successor().map(|from| Cursor::Pk {
            pk_col: self.pk.clone(),
            from,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{
        ast::common::TableRef,
        builder::select::SelectBuilder,
        dialect::{MySql, Postgres},
        ident,
        offsets::{OffsetStrategy, PkOffset},
        renderer::{Render, Renderer},
    };
    use model::{core::value::Value, pagination::cursor::Cursor};

    fn page_sql(cursor: &Cursor, limit: usize, mysql: bool) -> (String, Vec<Value>) {
        let strategy = PkOffset::new("id");
        let ast = SelectBuilder::new()
            .select(vec![ident("id"), ident("name")])
            .from(TableRef::parse("users"), None)
            .paginate(&strategy, cursor, limit)
            .build();

        let mut renderer = if mysql {
            Renderer::new(&MySql)
        } else {
            Renderer::new(&Postgres)
        };
        ast.render(&mut renderer);
        renderer.finish()
    }

    #[test]
    fn test_pk_page_uses_inclusive_lower_bound() {
        let (sql, params) = page_sql(&Cursor::pk("id", 1001i64), 1000, false);

        assert_eq!(
            sql,
            r#"SELECT "id", "name" FROM "users" WHERE ("id" >= $1) ORDER BY "id" ASC LIMIT $2"#
        );
        assert_eq!(params, vec![Value::Int(1001), Value::Int(1000)]);
    }

    #[test]
    fn test_pk_page_mysql() {
        let (sql, params) = page_sql(&Cursor::pk("id", 0u64), 10, true);

        assert_eq!(
            sql,
            "SELECT `id`, `name` FROM `users` WHERE (`id` >= ?) ORDER BY `id` ASC LIMIT ?"
        );
        assert_eq!(params, vec![Value::Uint(0), Value::Int(10)]);
    }

    #[test]
    fn test_first_page_without_cursor_has_no_bound() {
        let (sql, params) = page_sql(&Cursor::None, 5, false);

        assert_eq!(
            sql,
            r#"SELECT "id", "name" FROM "users" ORDER BY "id" ASC LIMIT $1"#
        );
        assert_eq!(params, vec![Value::Int(5)]);
    }

    #[test]
    fn test_oversized_limit_saturates() {
        let (sql, params) = page_sql(&Cursor::pk("id", 1i64), usize::MAX, false);

        assert!(sql.ends_with("LIMIT $2"));
        assert_eq!(params, vec![Value::Int(1), Value::Int(i64::MAX)]);
    }

    #[test]
    fn test_next_cursor_is_successor_of_last_key() {
        let strategy = PkOffset::new("id");
        assert_eq!(
            strategy.next_cursor(&Value::Int(1000)),
            Some(Cursor::pk("id", 1001i64))
        );
        assert_eq!(strategy.next_cursor(&Value::Int(i64::MAX)), None);
        assert_eq!(strategy.next_cursor(&Value::String("k".into())), None);
    }
}
