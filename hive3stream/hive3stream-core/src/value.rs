//! Intermediate representation of values carried by self-describing records.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
    sync::Arc,
};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};

use crate::error::ValueError;

/// Date format used when a date field declares none.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamp forms accepted when no declared format matches.
///
/// `%.f` makes the fractional part optional, so both
/// `2020-01-01 00:00:00` and `2020-01-01 00:00:00.123456789` parse.
pub const DEFAULT_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Value carried by a record field.
///
/// Conversions are lenient in the way record readers are: numbers widen and
/// narrow with range checks, and text parses into the requested type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
    String(Arc<str>),
    Bytes(Arc<[u8]>),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Array(Vec<Value>),
    Map(Vec<(String, Value)>),
    Record(Vec<(String, Value)>),
}

impl Value {
    pub fn string(s: impl AsRef<str>) -> Self {
        Self::String(Arc::from(s.as_ref()))
    }

    pub fn bytes(b: impl AsRef<[u8]>) -> Self {
        Self::Bytes(Arc::from(b.as_ref()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn to_i32(&self) -> Result<Option<i32>, ValueError> {
        self.to_i64()?
            .map(|v| i32::try_from(v).map_err(|_| out_of_range(v, "int")))
            .transpose()
    }

    pub fn to_i64(&self) -> Result<Option<i64>, ValueError> {
        match self {
            Value::Null => Ok(None),
            Value::Int(v) => Ok(Some(i64::from(*v))),
            Value::Long(v) => Ok(Some(*v)),
            Value::Float(v) => truncate_f64(f64::from(*v)).map(Some),
            Value::Double(v) => truncate_f64(*v).map(Some),
            Value::Decimal(d) => d
                .trunc()
                .to_i64()
                .map(Some)
                .ok_or_else(|| out_of_range(d, "long")),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| unparseable(s, "long")),
            _ => Err(self.type_mismatch("integer")),
        }
    }

    pub fn to_bool(&self) -> Result<Option<bool>, ValueError> {
        match self {
            Value::Null => Ok(None),
            Value::Bool(v) => Ok(Some(*v)),
            Value::String(s) => {
                let t = s.trim();
                if t.eq_ignore_ascii_case("true") {
                    Ok(Some(true))
                } else if t.eq_ignore_ascii_case("false") {
                    Ok(Some(false))
                } else {
                    Err(unparseable(s, "boolean"))
                }
            }
            _ => Err(self.type_mismatch("boolean")),
        }
    }

    pub fn to_f32(&self) -> Result<Option<f32>, ValueError> {
        match self {
            Value::Float(v) => Ok(Some(*v)),
            other => Ok(other.to_f64()?.map(|v| v as f32)),
        }
    }

    pub fn to_f64(&self) -> Result<Option<f64>, ValueError> {
        match self {
            Value::Null => Ok(None),
            Value::Int(v) => Ok(Some(f64::from(*v))),
            Value::Long(v) => Ok(Some(*v as f64)),
            Value::Float(v) => Ok(Some(f64::from(*v))),
            Value::Double(v) => Ok(Some(*v)),
            Value::Decimal(d) => d.to_f64().map(Some).ok_or_else(|| out_of_range(d, "double")),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| unparseable(s, "double")),
            _ => Err(self.type_mismatch("floating point")),
        }
    }

    pub fn to_decimal(&self) -> Result<Option<Decimal>, ValueError> {
        match self {
            Value::Null => Ok(None),
            Value::Int(v) => Ok(Some(Decimal::from(*v))),
            Value::Long(v) => Ok(Some(Decimal::from(*v))),
            Value::Float(v) => Decimal::from_f32(*v)
                .map(Some)
                .ok_or_else(|| out_of_range(v, "decimal")),
            Value::Double(v) => Decimal::from_f64(*v)
                .map(Some)
                .ok_or_else(|| out_of_range(v, "decimal")),
            Value::Decimal(d) => Ok(Some(*d)),
            Value::String(s) => {
                let t = s.trim();
                Decimal::from_str(t)
                    .or_else(|_| Decimal::from_scientific(t))
                    .map(Some)
                    .map_err(|_| unparseable(s, "decimal"))
            }
            _ => Err(self.type_mismatch("decimal")),
        }
    }

    /// Render any scalar as text. Compound values are rejected.
    pub fn to_text(&self) -> Result<Option<String>, ValueError> {
        match self {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.to_string())),
            Value::Bytes(b) => Ok(Some(String::from_utf8_lossy(b).into_owned())),
            Value::Array(_) | Value::Map(_) | Value::Record(_) => {
                Err(self.type_mismatch("scalar"))
            }
            scalar => Ok(Some(scalar.to_string())),
        }
    }

    /// Extract a byte sequence. Arrays must hold integers in `-128..=255`.
    pub fn to_bytes(&self) -> Result<Option<Vec<u8>>, ValueError> {
        match self {
            Value::Null => Ok(None),
            Value::Bytes(b) => Ok(Some(b.to_vec())),
            Value::String(s) => Ok(Some(s.as_bytes().to_vec())),
            Value::Array(items) => items
                .iter()
                .map(|item| match item.to_i64()? {
                    Some(v @ -128..=-1) => Ok(v as i8 as u8),
                    Some(v @ 0..=255) => Ok(v as u8),
                    Some(v) => Err(out_of_range(v, "byte")),
                    None => Err(item.type_mismatch("byte")),
                })
                .collect::<Result<Vec<u8>, _>>()
                .map(Some),
            _ => Err(self.type_mismatch("bytes")),
        }
    }

    pub fn to_array(&self) -> Result<Option<Vec<Value>>, ValueError> {
        match self {
            Value::Null => Ok(None),
            Value::Array(items) => Ok(Some(items.clone())),
            Value::Bytes(b) => Ok(Some(b.iter().map(|v| Value::Int(i32::from(*v))).collect())),
            _ => Err(self.type_mismatch("array")),
        }
    }

    /// Extract a date, parsing text with `format` (strftime syntax) or
    /// [`DEFAULT_DATE_FORMAT`]. Numbers are epoch milliseconds.
    pub fn to_date(&self, format: Option<&str>) -> Result<Option<NaiveDate>, ValueError> {
        match self {
            Value::Null => Ok(None),
            Value::Date(d) => Ok(Some(*d)),
            Value::Timestamp(ts) => Ok(Some(ts.date())),
            Value::Int(_)
            | Value::Long(_)
            | Value::Float(_)
            | Value::Double(_)
            | Value::Decimal(_) => {
                let millis = self.to_i64()?.unwrap_or_default();
                epoch_millis(millis).map(|ts| Some(ts.date()))
            }
            Value::String(s) => {
                NaiveDate::parse_from_str(s.trim(), format.unwrap_or(DEFAULT_DATE_FORMAT))
                    .map(Some)
                    .map_err(|_| unparseable(s, "date"))
            }
            _ => Err(self.type_mismatch("date")),
        }
    }

    /// Extract a timestamp. Text is tried against `format` first, then
    /// [`DEFAULT_TIMESTAMP_FORMATS`], see [`parse_timestamp`]. Numbers are
    /// epoch milliseconds; fractional milliseconds are truncated.
    pub fn to_timestamp(&self, format: Option<&str>) -> Result<Option<NaiveDateTime>, ValueError> {
        match self {
            Value::Null => Ok(None),
            Value::Timestamp(ts) => Ok(Some(*ts)),
            Value::Date(d) => Ok(Some(d.and_time(NaiveTime::MIN))),
            Value::Int(_)
            | Value::Long(_)
            | Value::Float(_)
            | Value::Double(_)
            | Value::Decimal(_) => {
                let millis = self.to_i64()?.unwrap_or_default();
                epoch_millis(millis).map(Some)
            }
            Value::String(s) => {
                let text = s.trim();
                format
                    .into_iter()
                    .chain(DEFAULT_TIMESTAMP_FORMATS.iter().copied())
                    .find_map(|fmt| parse_timestamp(text, fmt))
                    .map(Some)
                    .ok_or_else(|| unparseable(s, "timestamp"))
            }
            _ => Err(self.type_mismatch("timestamp")),
        }
    }

    pub fn type_mismatch(&self, expected: &'static str) -> ValueError {
        ValueError::TypeMismatch {
            expected,
            actual: self.variant_name(),
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Long(_) => "Long",
            Value::Float(_) => "Float",
            Value::Double(_) => "Double",
            Value::Decimal(_) => "Decimal",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::Date(_) => "Date",
            Value::Timestamp(_) => "Timestamp",
            Value::Array(_) => "Array",
            Value::Map(_) => "Map",
            Value::Record(_) => "Record",
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
            Value::Bytes(v) => write!(f, "{v:?}"),
            Value::Date(v) => write!(f, "{}", v.format(DEFAULT_DATE_FORMAT)),
            Value::Timestamp(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S%.f")),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) | Value::Record(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}={value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Parse `text` as a timestamp with a strftime `format`.
///
/// Formats without time fields yield midnight of the parsed date.
pub fn parse_timestamp(text: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, format)
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

fn truncate_f64(v: f64) -> Result<i64, ValueError> {
    let t = v.trunc();
    if t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64 {
        Ok(t as i64)
    } else {
        Err(out_of_range(v, "long"))
    }
}

fn epoch_millis(millis: i64) -> Result<NaiveDateTime, ValueError> {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| out_of_range(millis, "timestamp"))
}

fn out_of_range(value: impl Display, target: &'static str) -> ValueError {
    ValueError::OutOfRange {
        value: value.to_string(),
        target,
    }
}

fn unparseable(input: &str, target: &'static str) -> ValueError {
    ValueError::Unparseable {
        input: input.to_string(),
        target,
    }
}
