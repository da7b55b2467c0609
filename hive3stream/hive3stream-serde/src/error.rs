//! Error types for adapter setup and per-record conversion.

use hive3stream_core::{RecordError, ValueError};

/// Fatal error raised while building the adapter. No records are processed
/// after one of these.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A required table property is absent.
    #[error("missing table property '{key}'")]
    MissingProperty { key: &'static str },

    /// A table property has a value this adapter cannot use.
    #[error("invalid value {value:?} for table property '{key}': {detail}")]
    InvalidProperty {
        key: &'static str,
        value: String,
        detail: String,
    },

    /// The column-type list could not be parsed.
    #[error("failed to parse column types {input:?}: {detail}")]
    TypeParse { input: String, detail: String },

    /// Column names and column types disagree in length.
    #[error("table declares {names} column names but {types} column types")]
    ColumnCountMismatch { names: usize, types: usize },

    /// A field uses the internal `_col<N>` pattern but its literal name is not
    /// the canonical name of ordinal N.
    #[error(
        "internal column name ({field}) and position encoding ({position}) for the column name are at odds"
    )]
    InternalNameMismatch { field: String, position: usize },

    /// A field's internal `_col<N>` ordinal addresses a column the table lacks.
    #[error("internal column name ({field}) addresses position {position}, but the table has {columns} columns")]
    PositionOutOfRange {
        field: String,
        position: usize,
        columns: usize,
    },
}

/// Cause of a single field failing to convert.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    /// The record accessor could not coerce the value.
    #[error(transparent)]
    Access(#[from] RecordError),

    /// A nested value could not be coerced.
    #[error(transparent)]
    Value(#[from] ValueError),

    /// The target column's type has no conversion.
    #[error("cannot be converted to unsupported type {type_name}")]
    UnsupportedType { type_name: String },

    /// No timestamp form matched the value.
    #[error("cannot parse {input:?} as timestamp")]
    Timestamp { input: String },

    /// An exact decimal does not fit the column's precision.
    #[error("{value} does not fit decimal({precision},{scale})")]
    DecimalOverflow {
        value: String,
        precision: u32,
        scale: u32,
    },
}

/// A record rejected by [`RecordSerDe::deserialize`](crate::RecordSerDe::deserialize).
///
/// The whole record is rejected; no partial row is produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("error converting field '{field}' of record {record}: {source}")]
pub struct ConversionError {
    /// Rendering of the offending record.
    pub record: String,
    /// Name of the field that failed, as declared by the record.
    pub field: String,
    #[source]
    pub source: FieldError,
}
