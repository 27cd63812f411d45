use crate::executor::RangeQuery;
use model::core::value::Value;
use planner::query::{
    ast::{common::TableRef, select::Select},
    builder::select::SelectBuilder,
    column,
    dialect::Dialect,
    offsets::PkOffset,
    renderer::{Render, Renderer},
};
use tracing::debug;

pub struct QueryGenerator<'a> {
    dialect: &'a dyn Dialect,
}

impl<'a> QueryGenerator<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self { dialect }
    }

    /// Generates the keyset page query and its parameters:
    /// `SELECT cols FROM table WHERE pk >= $1 ORDER BY pk ASC LIMIT $2`.
    pub fn range_select(&self, table: &TableRef, query: &RangeQuery) -> (String, Vec<Value>) {
        let strategy = PkOffset::new(&query.primary_key.name);
        let columns = query.columns.iter().map(column).collect::<Vec<_>>();

        let select_ast = SelectBuilder::new()
            .select(columns)
            .from(table.clone(), None)
            .paginate(&strategy, &query.cursor(), query.limit)
            .build();

        let (sql, params) = self.render_ast(select_ast);
        debug!(dialect = %self.dialect.name(), %sql, "Generated range query");
        (sql, params)
    }

    fn render_ast(&self, ast: Select) -> (String, Vec<Value>) {
        let mut renderer = Renderer::new(self.dialect);
        ast.render(&mut renderer);
        renderer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::RangeQueryBuilder;
    use model::core::{column::ColumnRef, data_type::DataType};
    use planner::query::dialect::{MySql, Postgres};

    fn range_query(from: Value, limit: usize) -> RangeQuery {
        let id = ColumnRef::new("users", "id", DataType::Long);
        let name = ColumnRef::new("users", "name", DataType::VarChar);
        RangeQueryBuilder::new(id.clone())
            .columns(vec![id, name])
            .lower_bound(from)
            .limit(limit)
            .build()
    }

    #[test]
    fn test_range_select_postgres() {
        let generator = QueryGenerator::new(&Postgres);
        let (sql, params) = generator.range_select(
            &TableRef::parse("public.users"),
            &range_query(Value::Int(i64::MIN), 1000),
        );

        assert_eq!(
            sql,
            r#"SELECT "id", "name" FROM "public"."users" WHERE ("id" >= $1) ORDER BY "id" ASC LIMIT $2"#
        );
        assert_eq!(params, vec![Value::Int(i64::MIN), Value::Int(1000)]);
    }

    #[test]
    fn test_range_select_mysql() {
        let generator = QueryGenerator::new(&MySql);
        let (sql, params) =
            generator.range_select(&TableRef::parse("users"), &range_query(Value::Uint(0), 10));

        assert_eq!(
            sql,
            "SELECT `id`, `name` FROM `users` WHERE (`id` >= ?) ORDER BY `id` ASC LIMIT ?"
        );
        assert_eq!(params, vec![Value::Uint(0), Value::Int(10)]);
    }
}
