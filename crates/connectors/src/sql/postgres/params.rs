use crate::error::DbError;
use model::core::value::Value;
use tokio_postgres::types::{Json as PgJson, ToSql, Type};

pub struct PgParam(Box<dyn ToSql + Sync + Send>);

impl PgParam {
    /// Converts a value to the Rust type the server inferred for its placeholder.
    /// Integers are narrowed to the column width so `int2`/`int4` keys bind.
    pub fn for_type(value: Value, ty: &Type) -> Result<Self, DbError> {
        match (value, ty) {
            (Value::Int(v), &Type::INT2) => narrow::<i16, _>(v, ty).map(|v| PgParam(Box::new(v))),
            (Value::Int(v), &Type::INT4) => narrow::<i32, _>(v, ty).map(|v| PgParam(Box::new(v))),
            (Value::Uint(v), &Type::INT2) => narrow::<i16, _>(v, ty).map(|v| PgParam(Box::new(v))),
            (Value::Uint(v), &Type::INT4) => narrow::<i32, _>(v, ty).map(|v| PgParam(Box::new(v))),
            (Value::Uint(v), _) => narrow::<i64, _>(v, ty).map(|v| PgParam(Box::new(v))),
            (value, _) => Ok(PgParam::from_value(value)),
        }
    }

    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Int(v) => PgParam(Box::new(v)),
            Value::Uint(v) => PgParam(Box::new(i64::try_from(v).unwrap_or(i64::MAX))),
            Value::Float(v) => PgParam(Box::new(v)),
            Value::String(v) => PgParam(Box::new(v)),
            Value::Boolean(v) => PgParam(Box::new(v)),
            Value::Json(v) => PgParam(Box::new(PgJson(v))),
            Value::Uuid(v) => PgParam(Box::new(v)),
            Value::Bytes(v) => PgParam(Box::new(v)),
            Value::Date(v) => PgParam(Box::new(v)),
            Value::Time(v) => PgParam(Box::new(v)),
            Value::Timestamp(v) => PgParam(Box::new(v)),
            Value::TimestampNaive(v) => PgParam(Box::new(v)),
            Value::Null => PgParam(Box::new(Option::<String>::None)),
        }
    }
}

fn narrow<T, S>(value: S, ty: &Type) -> Result<T, DbError>
where
    T: TryFrom<S>,
    S: Copy + std::fmt::Display,
{
    T::try_from(value)
        .map_err(|_| DbError::ParamOutOfRange(format!("{value} does not fit {}", ty.name())))
}

impl AsRef<dyn ToSql + Sync> for PgParam {
    fn as_ref(&self) -> &(dyn ToSql + Sync + 'static) {
        &*self.0
    }
}

pub struct PgParamStore {
    pub params: Vec<PgParam>,
}

impl PgParamStore {
    /// Binds values against a prepared statement's parameter types.
    pub fn typed(values: Vec<Value>, types: &[Type]) -> Result<Self, DbError> {
        let params = values
            .into_iter()
            .enumerate()
            .map(|(idx, value)| match types.get(idx) {
                Some(ty) => PgParam::for_type(value, ty),
                None => Ok(PgParam::from_value(value)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { params })
    }

    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|param| param.as_ref())
            .collect::<Vec<_>>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrowing_to_column_width() {
        assert!(PgParam::for_type(Value::Int(i64::from(i32::MIN)), &Type::INT4).is_ok());
        assert!(PgParam::for_type(Value::Int(-32768), &Type::INT2).is_ok());
        assert!(PgParam::for_type(Value::Int(i64::MIN), &Type::INT8).is_ok());
    }

    #[test]
    fn test_out_of_range_param_rejected() {
        let err = PgParam::for_type(Value::Int(i64::from(i32::MAX) + 1), &Type::INT4)
            .err()
            .unwrap();
        assert!(matches!(err, DbError::ParamOutOfRange(msg) if msg.contains("int4")));

        assert!(matches!(
            PgParam::for_type(Value::Uint(u64::MAX), &Type::INT8),
            Err(DbError::ParamOutOfRange(_))
        ));
    }

    #[test]
    fn test_typed_store_falls_back_for_missing_types() {
        let store =
            PgParamStore::typed(vec![Value::Int(7), Value::Int(1000)], &[Type::INT4]).unwrap();
        assert_eq!(store.as_refs().len(), 2);
    }
}
