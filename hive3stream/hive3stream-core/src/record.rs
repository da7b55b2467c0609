//! Record abstraction consumed by the row adapter.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::{
    error::{RecordError, ValueError},
    schema::RecordSchema,
    value::Value,
};

/// A self-describing record: a declared schema plus values keyed by field name.
///
/// Implementors supply [`schema`](Record::schema) and
/// [`get_value`](Record::get_value); the typed accessors coerce the raw value
/// and return `Ok(None)` for absent or null fields.
pub trait Record {
    /// Schema declared by this record.
    fn schema(&self) -> &RecordSchema;

    /// Raw value of the named field, if present.
    fn get_value(&self, name: &str) -> Option<&Value>;

    fn get_as_int(&self, name: &str) -> Result<Option<i32>, RecordError> {
        coerce(self, name, Value::to_i32)
    }

    fn get_as_long(&self, name: &str) -> Result<Option<i64>, RecordError> {
        coerce(self, name, Value::to_i64)
    }

    fn get_as_boolean(&self, name: &str) -> Result<Option<bool>, RecordError> {
        coerce(self, name, Value::to_bool)
    }

    fn get_as_float(&self, name: &str) -> Result<Option<f32>, RecordError> {
        coerce(self, name, Value::to_f32)
    }

    fn get_as_double(&self, name: &str) -> Result<Option<f64>, RecordError> {
        coerce(self, name, Value::to_f64)
    }

    fn get_as_decimal(&self, name: &str) -> Result<Option<Decimal>, RecordError> {
        coerce(self, name, Value::to_decimal)
    }

    fn get_as_string(&self, name: &str) -> Result<Option<String>, RecordError> {
        coerce(self, name, Value::to_text)
    }

    fn get_as_bytes(&self, name: &str) -> Result<Option<Vec<u8>>, RecordError> {
        coerce(self, name, Value::to_bytes)
    }

    fn get_as_array(&self, name: &str) -> Result<Option<Vec<Value>>, RecordError> {
        coerce(self, name, Value::to_array)
    }

    fn get_as_date(&self, name: &str, format: Option<&str>) -> Result<Option<NaiveDate>, RecordError> {
        coerce(self, name, |v| v.to_date(format))
    }

    fn get_as_timestamp(
        &self,
        name: &str,
        format: Option<&str>,
    ) -> Result<Option<NaiveDateTime>, RecordError> {
        coerce(self, name, |v| v.to_timestamp(format))
    }

    /// Short human-readable rendering used to identify the record in errors.
    fn identity(&self) -> String {
        let fields: Vec<String> = self
            .schema()
            .iter()
            .map(|f| match self.get_value(&f.name) {
                Some(v) => format!("{}={v}", f.name),
                None => format!("{}=null", f.name),
            })
            .collect();
        format!("{{{}}}", fields.join(", "))
    }
}

fn coerce<R, T>(
    record: &R,
    name: &str,
    convert: impl FnOnce(&Value) -> Result<Option<T>, ValueError>,
) -> Result<Option<T>, RecordError>
where
    R: Record + ?Sized,
{
    match record.get_value(name) {
        None => Ok(None),
        Some(value) => convert(value).map_err(|source| RecordError::Field {
            field: name.to_string(),
            source,
        }),
    }
}

/// In-memory [`Record`] backed by a hash map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapRecord {
    schema: RecordSchema,
    values: HashMap<String, Value>,
}

impl MapRecord {
    pub fn new<K: Into<String>>(
        schema: RecordSchema,
        values: impl IntoIterator<Item = (K, Value)>,
    ) -> Self {
        Self {
            schema,
            values: values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Set or replace the value of a field.
    pub fn set_value(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }
}

impl Record for MapRecord {
    fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    fn get_value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}
