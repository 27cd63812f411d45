use crate::error::PluckError;
use connectors::{error::DbError, executor::QueryExecutor};
use model::{
    core::{column::ColumnRef, value::Value},
    records::row::Row,
};

/// Resolved shape of one scan: which columns are selected and where the
/// primary key sits in each fetched row.
#[derive(Debug, Clone, PartialEq)]
pub struct PluckPlan {
    pub requested: Vec<ColumnRef>,
    pub select_columns: Vec<ColumnRef>,
    pub primary_key: ColumnRef,
    pub pk_index: usize,
    /// The key was not requested, so it is selected first and stripped before delivery.
    pub pk_was_injected: bool,
}

impl PluckPlan {
    pub fn resolve<E>(executor: &E, columns: &[&str]) -> Result<Self, PluckError>
    where
        E: QueryExecutor + ?Sized,
    {
        let requested = columns
            .iter()
            .map(|name| executor.resolve_column(name))
            .collect::<Result<Vec<_>, _>>()?;

        let primary_key = executor.primary_key()?;
        if !primary_key.data_type.is_integer() {
            return Err(PluckError::invalid(format!(
                "primary key `{}` is {}, batching requires an integer key",
                primary_key, primary_key.data_type
            )));
        }

        let (select_columns, pk_index, pk_was_injected) =
            match requested.iter().position(|col| col.same_column(&primary_key)) {
                Some(idx) => (requested.clone(), idx, false),
                None => {
                    let mut select = Vec::with_capacity(requested.len() + 1);
                    select.push(primary_key.clone());
                    select.extend(requested.iter().cloned());
                    (select, 0, true)
                }
            };

        Ok(PluckPlan {
            requested,
            select_columns,
            primary_key,
            pk_index,
            pk_was_injected,
        })
    }

    /// Primary key of the last fetched row.
    pub fn last_key(&self, rows: &[Row]) -> Result<Option<Value>, DbError> {
        let Some(row) = rows.last() else {
            return Ok(None);
        };

        match row.get(self.pk_index) {
            Some(key) if key.is_integer() => Ok(Some(key.clone())),
            other => Err(DbError::decode(
                &self.primary_key.name,
                format!("expected an integer key, got {other:?}"),
            )),
        }
    }

    /// Converts a fetched row into the requested column order.
    pub fn shape(&self, row: Row) -> Row {
        if self.pk_was_injected {
            row.without_leading()
        } else {
            row
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connectors::{
        memory::MemoryTable,
        metadata::{column::ColumnMetadata, table::TableMetadata},
    };
    use model::core::data_type::DataType;
    use planner::query::ast::common::TableRef;

    fn table(pk_type: DataType) -> MemoryTable {
        let meta = TableMetadata::from_columns(
            TableRef::parse("users"),
            vec![
                ColumnMetadata::new("id", 0, pk_type).primary_key(),
                ColumnMetadata::new("name", 1, DataType::VarChar),
                ColumnMetadata::new("email", 2, DataType::VarChar),
            ],
        )
        .unwrap();
        MemoryTable::new(meta).unwrap()
    }

    #[test]
    fn test_requested_key_keeps_its_position() {
        let plan = PluckPlan::resolve(&table(DataType::Long), &["name", "ID"]).unwrap();
        assert!(!plan.pk_was_injected);
        assert_eq!(plan.pk_index, 1);
        assert_eq!(plan.select_columns, plan.requested);
    }

    #[test]
    fn test_missing_key_is_injected_first() {
        let plan = PluckPlan::resolve(&table(DataType::Long), &["email", "name"]).unwrap();
        assert!(plan.pk_was_injected);
        assert_eq!(plan.pk_index, 0);

        let names = plan
            .select_columns
            .iter()
            .map(|col| col.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["id", "email", "name"]);

        let row = Row::new(vec![Value::Int(1), Value::from("a@x"), Value::from("a")]);
        assert_eq!(
            plan.shape(row),
            Row::new(vec![Value::from("a@x"), Value::from("a")])
        );
    }

    #[test]
    fn test_unknown_column_surfaces_from_executor() {
        let err = PluckPlan::resolve(&table(DataType::Long), &["name", "nope"]).unwrap_err();
        assert!(matches!(
            err,
            PluckError::Database(DbError::UnknownColumn { column, .. }) if column == "nope"
        ));
    }

    #[test]
    fn test_non_integer_key_rejected() {
        let err = PluckPlan::resolve(&table(DataType::Uuid), &["name"]).unwrap_err();
        assert!(matches!(err, PluckError::InvalidArgument(msg) if msg.contains("integer key")));
    }

    #[test]
    fn test_last_key_reads_key_position() {
        let plan = PluckPlan::resolve(&table(DataType::Long), &["name", "id"]).unwrap();
        let rows = vec![
            Row::new(vec![Value::from("a"), Value::Int(3)]),
            Row::new(vec![Value::from("b"), Value::Int(9)]),
        ];
        assert_eq!(plan.last_key(&rows).unwrap(), Some(Value::Int(9)));
        assert_eq!(plan.last_key(&[]).unwrap(), None);

        let broken = vec![Row::new(vec![Value::from("c"), Value::Null])];
        assert!(matches!(plan.last_key(&broken), Err(DbError::Decode { .. })));
    }
}
