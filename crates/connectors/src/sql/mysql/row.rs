use crate::error::DbError;
use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use model::{
    core::{column::ColumnRef, data_type::DataType, value::Value},
    records::row::Row,
};
use mysql_async::{FromValueError, Row as MySqlRow, Value as MySqlValue, from_value_opt};
use mysql_async::prelude::FromValue;
use uuid::Uuid;

/// Decodes a result row by the declared types of the selected columns.
/// Unsigned key columns decode to `Value::Uint` so their domain is preserved.
pub fn decode_row(mut row: MySqlRow, columns: &[ColumnRef]) -> Result<Row, DbError> {
    columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let raw = row.take::<MySqlValue, _>(idx).unwrap_or(MySqlValue::NULL);
            decode_value(raw, column)
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Row::new)
}

fn decode_value(raw: MySqlValue, column: &ColumnRef) -> Result<Value, DbError> {
    if raw == MySqlValue::NULL {
        return Ok(Value::Null);
    }

    let value = match &column.data_type {
        DataType::Tiny | DataType::Short | DataType::Int | DataType::Long => {
            Value::Int(convert(raw, column)?)
        }
        DataType::TinyUnsigned
        | DataType::ShortUnsigned
        | DataType::IntUnsigned
        | DataType::LongUnsigned
        | DataType::Year => Value::Uint(convert(raw, column)?),
        DataType::Float => Value::Float(f64::from(convert::<f32>(raw, column)?)),
        DataType::Double => Value::Float(convert(raw, column)?),
        DataType::Decimal => {
            let decimal = convert::<BigDecimal>(raw, column)?;
            Value::Float(decimal.to_f64().ok_or_else(|| {
                DbError::decode(&column.name, format!("{decimal} is not representable as f64"))
            })?)
        }
        DataType::Boolean => Value::Boolean(convert(raw, column)?),
        DataType::Json => Value::Json(convert(raw, column)?),
        DataType::Uuid => {
            let text = convert::<String>(raw, column)?;
            Value::Uuid(
                Uuid::parse_str(&text).map_err(|e| DbError::decode(&column.name, e.to_string()))?,
            )
        }
        DataType::Bytea | DataType::Blob => Value::Bytes(convert(raw, column)?),
        DataType::Date => Value::Date(convert::<NaiveDate>(raw, column)?),
        DataType::Time => Value::Time(convert::<NaiveTime>(raw, column)?),
        DataType::Timestamp => Value::TimestampNaive(convert::<NaiveDateTime>(raw, column)?),
        DataType::TimestampTz => Value::Timestamp(convert::<NaiveDateTime>(raw, column)?.and_utc()),
        DataType::Null => Value::Null,
        DataType::Char
        | DataType::VarChar
        | DataType::String
        | DataType::Enum
        | DataType::Custom(_) => Value::String(convert(raw, column)?),
    };

    Ok(value)
}

fn convert<T: FromValue>(raw: MySqlValue, column: &ColumnRef) -> Result<T, DbError> {
    from_value_opt::<T>(raw)
        .map_err(|FromValueError(raw)| DbError::decode(&column.name, format!("unexpected {raw:?}")))
}
