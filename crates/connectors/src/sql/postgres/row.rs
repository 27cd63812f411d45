use crate::error::DbError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use model::{
    core::{column::ColumnRef, data_type::DataType, value::Value},
    records::row::Row,
};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use tokio_postgres::{Row as PgRow, types::FromSql};
use uuid::Uuid;

/// Decodes a result row, reading each value by the type of the column it was
/// selected as.
pub fn decode_row(row: &PgRow, columns: &[ColumnRef]) -> Result<Row, DbError> {
    columns
        .iter()
        .enumerate()
        .map(|(idx, column)| decode_value(row, idx, column))
        .collect::<Result<Vec<_>, _>>()
        .map(Row::new)
}

fn decode_value(row: &PgRow, idx: usize, column: &ColumnRef) -> Result<Value, DbError> {
    let value = match &column.data_type {
        DataType::Tiny | DataType::TinyUnsigned | DataType::Short | DataType::ShortUnsigned => {
            get::<i16>(row, idx, column)?.map(|v| Value::Int(i64::from(v)))
        }
        DataType::Int | DataType::IntUnsigned | DataType::Year => {
            get::<i32>(row, idx, column)?.map(Value::from)
        }
        DataType::Long | DataType::LongUnsigned => get::<i64>(row, idx, column)?.map(Value::Int),
        DataType::Float => get::<f32>(row, idx, column)?.map(|v| Value::Float(f64::from(v))),
        DataType::Double => get::<f64>(row, idx, column)?.map(Value::Float),
        DataType::Decimal => match get::<Decimal>(row, idx, column)? {
            Some(v) => Some(Value::Float(v.to_f64().ok_or_else(|| {
                DbError::decode(&column.name, format!("{v} is not representable as f64"))
            })?)),
            None => None,
        },
        DataType::Boolean => get::<bool>(row, idx, column)?.map(Value::Boolean),
        DataType::Json => get::<serde_json::Value>(row, idx, column)?.map(Value::Json),
        DataType::Uuid => get::<Uuid>(row, idx, column)?.map(Value::Uuid),
        DataType::Bytea | DataType::Blob => get::<Vec<u8>>(row, idx, column)?.map(Value::Bytes),
        DataType::Date => get::<NaiveDate>(row, idx, column)?.map(Value::Date),
        DataType::Time => get::<NaiveTime>(row, idx, column)?.map(Value::Time),
        DataType::Timestamp => {
            get::<NaiveDateTime>(row, idx, column)?.map(Value::TimestampNaive)
        }
        DataType::TimestampTz => get::<DateTime<Utc>>(row, idx, column)?.map(Value::Timestamp),
        DataType::Null => None,
        DataType::Char
        | DataType::VarChar
        | DataType::String
        | DataType::Enum
        | DataType::Custom(_) => get::<String>(row, idx, column)?.map(Value::String),
    };

    Ok(value.unwrap_or(Value::Null))
}

fn get<'r, T>(row: &'r PgRow, idx: usize, column: &ColumnRef) -> Result<Option<T>, DbError>
where
    T: FromSql<'r>,
{
    row.try_get::<_, Option<T>>(idx)
        .map_err(|e| DbError::decode(&column.name, e.to_string()))
}
