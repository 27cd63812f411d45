use connectors::metadata::table::TableMetadata;
use model::{core::value::Value, records::row::Plucked};
use serde_json::{Value as JsonValue, json};
use std::io::{self, BufWriter, Write};

pub fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Int(v) => json!(v),
        Value::Uint(v) => json!(v),
        Value::Float(v) => json!(v),
        Value::String(v) => json!(v),
        Value::Boolean(v) => json!(v),
        Value::Json(v) => v.clone(),
        Value::Uuid(v) => json!(v.to_string()),
        Value::Bytes(v) => json!(v),
        Value::Date(v) => json!(v.to_string()),
        Value::Time(v) => json!(v.to_string()),
        Value::Timestamp(v) => json!(v.to_rfc3339()),
        Value::TimestampNaive(v) => json!(v.to_string()),
        Value::Null => JsonValue::Null,
    }
}

/// Scalars print bare, tuples as arrays.
pub fn plucked_to_json(row: &Plucked) -> JsonValue {
    match row {
        Plucked::Scalar(value) => value_to_json(value),
        Plucked::Tuple(values) => JsonValue::Array(values.iter().map(value_to_json).collect()),
    }
}

pub fn metadata_to_json(meta: &TableMetadata) -> JsonValue {
    let columns = meta
        .columns
        .iter()
        .map(|col| {
            json!({
                "name": col.name,
                "type": col.data_type.to_string(),
                "nullable": col.is_nullable,
                "primary_key": col.is_primary_key,
            })
        })
        .collect::<Vec<_>>();

    json!({
        "table": meta.name(),
        "schema": meta.table.schema,
        "columns": columns,
    })
}

/// Writes one JSON document per line.
pub struct JsonLines {
    out: BufWriter<Box<dyn Write>>,
}

impl JsonLines {
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    pub fn file(path: &str) -> io::Result<Self> {
        Ok(Self::new(Box::new(std::fs::File::create(path)?)))
    }

    fn new(out: Box<dyn Write>) -> Self {
        JsonLines {
            out: BufWriter::new(out),
        }
    }

    pub fn write(&mut self, row: &Plucked) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, &plucked_to_json(row))?;
        self.out.write_all(b"\n")
    }

    pub fn finish(mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars_print_bare() {
        assert_eq!(plucked_to_json(&Plucked::Scalar(Value::from("ann"))), json!("ann"));
        assert_eq!(plucked_to_json(&Plucked::Scalar(Value::Null)), JsonValue::Null);
    }

    #[test]
    fn test_tuples_print_as_arrays() {
        let row = Plucked::Tuple(vec![Value::Int(-1), Value::Uint(u64::MAX), Value::Boolean(true)]);
        assert_eq!(plucked_to_json(&row), json!([-1, u64::MAX, true]));
    }
}
