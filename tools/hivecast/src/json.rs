//! JSON boundary of the CLI: records in, rows out.

use anyhow::{Result, bail};
use hive3stream_core::{MapRecord, RecordDataType, RecordField, RecordSchema, Value};
use hive3stream_serde::{Row, RowValue};
use serde_json::{Map, Number, Value as Json};

const TIMESTAMP_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Parse one JSON object into a record whose schema is inferred from its values.
pub fn parse_record(line: &str) -> Result<MapRecord> {
    let Json::Object(object) = serde_json::from_str::<Json>(line)? else {
        bail!("expected a JSON object");
    };
    Ok(record_from_object(&object))
}

fn record_from_object(object: &Map<String, Json>) -> MapRecord {
    let schema = object_schema(object);
    MapRecord::new(
        schema,
        object.iter().map(|(name, v)| (name.clone(), to_value(v))),
    )
}

fn object_schema(object: &Map<String, Json>) -> RecordSchema {
    object
        .iter()
        .map(|(name, v)| RecordField::new(name.clone(), infer_type(v), true))
        .collect::<Vec<_>>()
        .into()
}

/// Declared type of a JSON value. Nulls and empty arrays default to strings.
pub fn infer_type(json: &Json) -> RecordDataType {
    match json {
        Json::Null | Json::String(_) => RecordDataType::String,
        Json::Bool(_) => RecordDataType::Boolean,
        Json::Number(n) => match n.as_i64() {
            Some(v) if i32::try_from(v).is_ok() => RecordDataType::Int,
            Some(_) => RecordDataType::Long,
            None => RecordDataType::Double,
        },
        Json::Array(items) => {
            let elem = items
                .iter()
                .find(|item| !item.is_null())
                .map(infer_type)
                .unwrap_or(RecordDataType::String);
            RecordDataType::Array(Box::new(elem))
        }
        Json::Object(object) => RecordDataType::Record(object_schema(object)),
    }
}

pub fn to_value(json: &Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(v) => Value::Bool(*v),
        Json::Number(n) => match n.as_i64() {
            Some(v) => i32::try_from(v).map_or(Value::Long(v), Value::Int),
            None => n.as_f64().map_or(Value::Null, Value::Double),
        },
        Json::String(s) => Value::string(s),
        Json::Array(items) => Value::Array(items.iter().map(to_value).collect()),
        Json::Object(object) => Value::Record(
            object
                .iter()
                .map(|(name, v)| (name.clone(), to_value(v)))
                .collect(),
        ),
    }
}

/// Render a row as a JSON array, `null` for absent slots.
pub fn row_to_json(row: &Row) -> Json {
    Json::Array(row.iter().map(slot_to_json).collect())
}

fn slot_to_json(slot: &Option<RowValue>) -> Json {
    slot.as_ref().map_or(Json::Null, row_value_to_json)
}

fn row_value_to_json(value: &RowValue) -> Json {
    match value {
        RowValue::Boolean(v) => Json::Bool(*v),
        RowValue::Int(v) => Json::from(*v),
        RowValue::Long(v) => Json::from(*v),
        RowValue::Float(v) => float(f64::from(*v)),
        RowValue::Double(v) => float(*v),
        // Rendered as text to keep every digit.
        RowValue::Decimal(v) => Json::String(v.to_string()),
        RowValue::String(v) => Json::String(v.clone()),
        RowValue::Binary(v) => Json::Array(v.iter().map(|b| Json::from(*b)).collect()),
        RowValue::Date(v) => Json::String(v.to_string()),
        RowValue::Timestamp(v) => Json::String(v.format(TIMESTAMP_OUTPUT_FORMAT).to_string()),
        RowValue::List(items) => Json::Array(items.iter().map(slot_to_json).collect()),
        RowValue::Map(entries) | RowValue::Struct(entries) => Json::Object(
            entries
                .iter()
                .map(|(name, v)| (name.clone(), slot_to_json(v)))
                .collect(),
        ),
    }
}

fn float(v: f64) -> Json {
    Number::from_f64(v).map_or(Json::Null, Json::Number)
}
