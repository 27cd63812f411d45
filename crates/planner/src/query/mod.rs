use crate::query::ast::expr::{Expr, Ident};
use model::core::{column::ColumnRef, value::Value};

pub mod ast;
pub mod builder;
pub mod dialect;
pub mod offsets;
pub mod renderer;

pub fn ident(name: &str) -> Expr {
    Expr::Identifier(Ident {
        qualifier: None,
        name: name.to_string(),
    })
}

pub fn value(val: Value) -> Expr {
    Expr::Value(val)
}

/// Identifier for a resolved column, unqualified since range queries read a single table.
pub fn column(col: &ColumnRef) -> Expr {
    ident(&col.name)
}
