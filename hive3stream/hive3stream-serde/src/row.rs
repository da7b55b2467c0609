//! Row buffer handed to the table write path.

use std::ops::{Deref, Index};

use chrono::{NaiveDate, NaiveDateTime};
use hive3stream_core::{RecordDataType, Value, ValueError};
use rust_decimal::Decimal;

/// Converted value stored in a row slot.
///
/// Scalars are stored inline; only text, binary and collection values own
/// heap memory.
#[derive(Debug, Clone, PartialEq)]
pub enum RowValue {
    Boolean(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
    String(String),
    Binary(Vec<u8>),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    List(Vec<Option<RowValue>>),
    Map(Vec<(String, Option<RowValue>)>),
    Struct(Vec<(String, Option<RowValue>)>),
}

impl RowValue {
    /// Convert a raw value without type guidance, keeping its own shape.
    pub fn from_value(value: &Value) -> Option<RowValue> {
        Some(match value {
            Value::Null => return None,
            Value::Bool(v) => RowValue::Boolean(*v),
            Value::Int(v) => RowValue::Int(*v),
            Value::Long(v) => RowValue::Long(*v),
            Value::Float(v) => RowValue::Float(*v),
            Value::Double(v) => RowValue::Double(*v),
            Value::Decimal(v) => RowValue::Decimal(*v),
            Value::String(v) => RowValue::String(v.to_string()),
            Value::Bytes(v) => RowValue::Binary(v.to_vec()),
            Value::Date(v) => RowValue::Date(*v),
            Value::Timestamp(v) => RowValue::Timestamp(*v),
            Value::Array(items) => RowValue::List(items.iter().map(RowValue::from_value).collect()),
            Value::Map(entries) => RowValue::Map(named_entries(entries)),
            Value::Record(entries) => RowValue::Struct(named_entries(entries)),
        })
    }

    /// Convert a raw value into the shape its declared record type describes.
    ///
    /// Records become structs with one member per declared field, in schema
    /// order; members missing from the value are `None`.
    pub fn from_typed_value(
        value: &Value,
        data_type: &RecordDataType,
    ) -> Result<Option<RowValue>, ValueError> {
        if value.is_null() {
            return Ok(None);
        }

        let converted = match data_type {
            RecordDataType::Boolean => value.to_bool()?.map(RowValue::Boolean),
            RecordDataType::Byte | RecordDataType::Short | RecordDataType::Int => {
                value.to_i32()?.map(RowValue::Int)
            }
            RecordDataType::Long => value.to_i64()?.map(RowValue::Long),
            RecordDataType::Float => value.to_f32()?.map(RowValue::Float),
            RecordDataType::Double => value.to_f64()?.map(RowValue::Double),
            RecordDataType::Decimal { .. } => value.to_decimal()?.map(RowValue::Decimal),
            RecordDataType::String | RecordDataType::Char => {
                value.to_text()?.map(RowValue::String)
            }
            RecordDataType::Date { format } => value.to_date(format.as_deref())?.map(RowValue::Date),
            RecordDataType::Timestamp { format } => value
                .to_timestamp(format.as_deref())?
                .map(RowValue::Timestamp),
            RecordDataType::Array(elem) => match value {
                Value::Array(items) => Some(RowValue::List(
                    items
                        .iter()
                        .map(|item| RowValue::from_typed_value(item, elem))
                        .collect::<Result<_, _>>()?,
                )),
                _ => return Err(value.type_mismatch("array")),
            },
            RecordDataType::Map(value_type) => match value {
                Value::Map(entries) | Value::Record(entries) => Some(RowValue::Map(
                    entries
                        .iter()
                        .map(|(key, v)| -> Result<_, ValueError> {
                            Ok((key.clone(), RowValue::from_typed_value(v, value_type)?))
                        })
                        .collect::<Result<_, ValueError>>()?,
                )),
                _ => return Err(value.type_mismatch("map")),
            },
            RecordDataType::Record(schema) => match value {
                Value::Record(entries) | Value::Map(entries) => Some(RowValue::Struct(
                    schema
                        .iter()
                        .map(|field| -> Result<_, ValueError> {
                            let member = entries
                                .iter()
                                .find(|(name, _)| *name == field.name)
                                .map(|(_, v)| RowValue::from_typed_value(v, &field.data_type))
                                .transpose()?
                                .flatten();
                            Ok((field.name.clone(), member))
                        })
                        .collect::<Result<_, ValueError>>()?,
                )),
                _ => return Err(value.type_mismatch("record")),
            },
        };
        Ok(converted)
    }
}

fn named_entries(entries: &[(String, Value)]) -> Vec<(String, Option<RowValue>)> {
    entries
        .iter()
        .map(|(name, v)| (name.clone(), RowValue::from_value(v)))
        .collect()
}

/// Fixed-length row, one slot per table column. Absent slots are `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row(Vec<Option<RowValue>>);

impl Row {
    /// A row of `columns` absent slots.
    pub fn absent(columns: usize) -> Self {
        Self(vec![None; columns])
    }

    pub fn get(&self, ordinal: usize) -> Option<&RowValue> {
        self.0.get(ordinal).and_then(Option::as_ref)
    }

    pub(crate) fn set(&mut self, ordinal: usize, value: Option<RowValue>) {
        self.0[ordinal] = value;
    }

    pub fn as_slice(&self) -> &[Option<RowValue>] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Option<RowValue>> {
        self.0
    }
}

impl Deref for Row {
    type Target = [Option<RowValue>];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl Index<usize> for Row {
    type Output = Option<RowValue>;

    fn index(&self, ordinal: usize) -> &Self::Output {
        &self.0[ordinal]
    }
}

impl From<Row> for Vec<Option<RowValue>> {
    fn from(value: Row) -> Self {
        value.0
    }
}

impl From<Vec<Option<RowValue>>> for Row {
    fn from(value: Vec<Option<RowValue>>) -> Self {
        Self(value)
    }
}
