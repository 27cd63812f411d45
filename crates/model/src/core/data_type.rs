use crate::core::value::Value;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, collections::HashMap, fmt};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DataType {
    Tiny,
    TinyUnsigned,
    Short,
    ShortUnsigned,
    Int,
    IntUnsigned,
    Long,
    LongUnsigned,
    Float,
    Double,
    Decimal,
    Boolean,
    Char,
    VarChar,
    String,
    Json,
    Uuid,
    Bytea,
    Blob,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Year,
    Enum,
    Null,
    Custom(String),
}

lazy_static! {
    static ref MYSQL_TYPE_MAP: HashMap<&'static str, DataType> = build_mysql_type_map();
    static ref POSTGRES_TYPE_MAP: HashMap<&'static str, DataType> = build_postgres_type_map();
}

impl DataType {
    /// Maps a MySQL `COLUMN_TYPE` (e.g. `int unsigned`, `varchar(45)`) to a `DataType`.
    /// Unknown names become `Custom` so the column can still be selected.
    pub fn from_mysql_type(type_name: &str) -> Self {
        let normalized = Self::normalize_type_name(type_name);
        MYSQL_TYPE_MAP
            .get(normalized.as_str())
            .cloned()
            .unwrap_or(DataType::Custom(normalized))
    }

    /// Maps a PostgreSQL `udt_name` or `data_type` (e.g. `int4`, `timestamptz`) to a `DataType`.
    pub fn from_postgres_type(type_name: &str) -> Self {
        let normalized = Self::normalize_type_name(type_name);
        POSTGRES_TYPE_MAP
            .get(normalized.as_str())
            .cloned()
            .unwrap_or(DataType::Custom(normalized))
    }

    pub fn is_integer(&self) -> bool {
        self.key_bounds().is_some()
    }

    /// Smallest and largest key an integer column of this type can hold.
    pub fn key_bounds(&self) -> Option<(Value, Value)> {
        let bounds = match self {
            DataType::Tiny => (
                Value::Int(i64::from(i8::MIN)),
                Value::Int(i64::from(i8::MAX)),
            ),
            DataType::TinyUnsigned => (Value::Uint(0), Value::Uint(u64::from(u8::MAX))),
            DataType::Short => (
                Value::Int(i64::from(i16::MIN)),
                Value::Int(i64::from(i16::MAX)),
            ),
            DataType::ShortUnsigned => (Value::Uint(0), Value::Uint(u64::from(u16::MAX))),
            DataType::Int => (
                Value::Int(i64::from(i32::MIN)),
                Value::Int(i64::from(i32::MAX)),
            ),
            DataType::IntUnsigned => (Value::Uint(0), Value::Uint(u64::from(u32::MAX))),
            DataType::Long => (Value::Int(i64::MIN), Value::Int(i64::MAX)),
            DataType::LongUnsigned => (Value::Uint(0), Value::Uint(u64::MAX)),
            _ => return None,
        };
        Some(bounds)
    }

    /// The first key a scan over this column starts from.
    pub fn min_key(&self) -> Option<Value> {
        self.key_bounds().map(|(min, _)| min)
    }

    /// Whether `value` is an integer inside this column's key range.
    pub fn contains_key(&self, value: &Value) -> bool {
        match self.key_bounds() {
            Some((min, max)) => matches!(
                (value.compare(&min), value.compare(&max)),
                (Some(lo), Some(hi)) if lo.is_ge() && hi.is_le()
            ),
            None => false,
        }
    }

    pub fn postgres_name(&self) -> Cow<'_, str> {
        match self {
            DataType::Tiny
            | DataType::TinyUnsigned
            | DataType::Short
            | DataType::ShortUnsigned => Cow::Borrowed("SMALLINT"),
            DataType::Int | DataType::IntUnsigned | DataType::Year => Cow::Borrowed("INTEGER"),
            DataType::Long | DataType::LongUnsigned => Cow::Borrowed("BIGINT"),
            DataType::Float => Cow::Borrowed("REAL"),
            DataType::Double => Cow::Borrowed("DOUBLE PRECISION"),
            DataType::Decimal => Cow::Borrowed("NUMERIC"),
            DataType::Boolean => Cow::Borrowed("BOOLEAN"),
            DataType::Char => Cow::Borrowed("CHAR"),
            DataType::VarChar => Cow::Borrowed("VARCHAR"),
            DataType::String | DataType::Enum => Cow::Borrowed("TEXT"),
            DataType::Json => Cow::Borrowed("JSONB"),
            DataType::Uuid => Cow::Borrowed("UUID"),
            DataType::Bytea | DataType::Blob => Cow::Borrowed("BYTEA"),
            DataType::Date => Cow::Borrowed("DATE"),
            DataType::Time => Cow::Borrowed("TIME"),
            DataType::Timestamp => Cow::Borrowed("TIMESTAMP"),
            DataType::TimestampTz => Cow::Borrowed("TIMESTAMPTZ"),
            DataType::Null => Cow::Borrowed("NULL"),
            DataType::Custom(name) => Cow::Borrowed(name),
        }
    }

    fn normalize_type_name(type_name: &str) -> String {
        // `varchar(45)` / `int(11) unsigned` -> `VARCHAR` / `INT UNSIGNED`
        let upper = type_name.trim().to_uppercase();
        let mut out = String::with_capacity(upper.len());
        let mut depth = 0usize;
        for ch in upper.chars() {
            match ch {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                _ if depth == 0 => out.push(ch),
                _ => {}
            }
        }
        out.split_whitespace()
            .filter(|word| *word != "ZEROFILL")
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.postgres_name())
    }
}

fn build_mysql_type_map() -> HashMap<&'static str, DataType> {
    use DataType::*;

    let entries = [
        ("BOOLEAN", Boolean),
        ("BOOL", Boolean),
        ("TINYINT", Tiny),
        ("SMALLINT", Short),
        ("TINYINT UNSIGNED", TinyUnsigned),
        ("SMALLINT UNSIGNED", ShortUnsigned),
        ("MEDIUMINT", Int),
        ("MEDIUMINT UNSIGNED", IntUnsigned),
        ("INT", Int),
        ("INTEGER", Int),
        ("INT UNSIGNED", IntUnsigned),
        ("INTEGER UNSIGNED", IntUnsigned),
        ("BIGINT", Long),
        ("BIGINT UNSIGNED", LongUnsigned),
        ("FLOAT", Float),
        ("DOUBLE", Double),
        ("DOUBLE PRECISION", Double),
        ("DECIMAL", Decimal),
        ("NUMERIC", Decimal),
        ("TIMESTAMP", TimestampTz),
        ("DATETIME", Timestamp),
        ("DATE", Date),
        ("TIME", Time),
        ("YEAR", Year),
        ("ENUM", Enum),
        ("SET", String),
        ("JSON", Json),
        ("CHAR", Char),
        ("VARCHAR", VarChar),
        ("TEXT", String),
        ("TINYTEXT", String),
        ("MEDIUMTEXT", String),
        ("LONGTEXT", String),
        ("BINARY", Blob),
        ("VARBINARY", Blob),
        ("TINYBLOB", Blob),
        ("BLOB", Blob),
        ("MEDIUMBLOB", Blob),
        ("LONGBLOB", Blob),
    ];

    entries.into_iter().collect()
}

fn build_postgres_type_map() -> HashMap<&'static str, DataType> {
    use DataType::*;

    let entries = [
        ("BOOLEAN", Boolean),
        ("BOOL", Boolean),
        ("SMALLINT", Short),
        ("INT2", Short),
        ("SMALLSERIAL", Short),
        ("INTEGER", Int),
        ("INT", Int),
        ("INT4", Int),
        ("SERIAL", Int),
        ("INT8", Long),
        ("BIGINT", Long),
        ("BIGSERIAL", Long),
        ("FLOAT4", Float),
        ("REAL", Float),
        ("FLOAT8", Double),
        ("DOUBLE PRECISION", Double),
        ("NUMERIC", Decimal),
        ("DECIMAL", Decimal),
        ("JSONB", Json),
        ("JSON", Json),
        ("UUID", Uuid),
        ("TEXT", String),
        ("NAME", String),
        ("CITEXT", String),
        ("CHARACTER VARYING", VarChar),
        ("VARCHAR", VarChar),
        ("CHARACTER", Char),
        ("CHAR", Char),
        ("BPCHAR", Char),
        ("BYTEA", Bytea),
        ("DATE", Date),
        ("TIME", Time),
        ("TIME WITHOUT TIME ZONE", Time),
        ("TIMESTAMP", Timestamp),
        ("TIMESTAMP WITHOUT TIME ZONE", Timestamp),
        ("TIMESTAMP WITH TIME ZONE", TimestampTz),
        ("TIMESTAMPTZ", TimestampTz),
    ];

    entries.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_column_types_strip_display_width() {
        assert_eq!(DataType::from_mysql_type("int(11)"), DataType::Int);
        assert_eq!(
            DataType::from_mysql_type("int(10) unsigned"),
            DataType::IntUnsigned
        );
        assert_eq!(
            DataType::from_mysql_type("bigint(20) unsigned zerofill"),
            DataType::LongUnsigned
        );
        assert_eq!(DataType::from_mysql_type("varchar(45)"), DataType::VarChar);
    }

    #[test]
    fn test_postgres_udt_names() {
        assert_eq!(DataType::from_postgres_type("int4"), DataType::Int);
        assert_eq!(DataType::from_postgres_type("int8"), DataType::Long);
        assert_eq!(
            DataType::from_postgres_type("timestamptz"),
            DataType::TimestampTz
        );
        assert_eq!(
            DataType::from_postgres_type("geometry"),
            DataType::Custom("GEOMETRY".to_string())
        );
    }

    #[test]
    fn test_key_bounds_follow_column_width() {
        assert_eq!(DataType::Short.min_key(), Some(Value::Int(-32768)));
        assert_eq!(DataType::Int.min_key(), Some(Value::Int(i64::from(i32::MIN))));
        assert_eq!(DataType::LongUnsigned.min_key(), Some(Value::Uint(0)));
        assert_eq!(DataType::VarChar.min_key(), None);
        assert!(!DataType::Uuid.is_integer());
    }

    #[test]
    fn test_tinyint_keeps_its_own_range() {
        assert_eq!(DataType::from_mysql_type("tinyint(4)"), DataType::Tiny);
        assert_eq!(
            DataType::from_mysql_type("tinyint unsigned"),
            DataType::TinyUnsigned
        );
        assert_eq!(
            DataType::Tiny.key_bounds(),
            Some((Value::Int(-128), Value::Int(127)))
        );
        assert!(!DataType::Tiny.contains_key(&Value::Int(128)));
        assert!(!DataType::TinyUnsigned.contains_key(&Value::Uint(256)));
        assert_eq!(DataType::TinyUnsigned.min_key(), Some(Value::Uint(0)));
    }

    #[test]
    fn test_contains_key() {
        assert!(DataType::Int.contains_key(&Value::Int(1)));
        assert!(!DataType::Int.contains_key(&Value::Int(i64::from(i32::MAX) + 1)));
        assert!(!DataType::IntUnsigned.contains_key(&Value::Int(-1)));
        assert!(DataType::IntUnsigned.contains_key(&Value::Int(5)));
        assert!(!DataType::Long.contains_key(&Value::String("1".into())));
    }
}
