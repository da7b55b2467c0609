//! Row adapter between self-describing records and fixed-schema table rows.
//!
//! [`RecordSerDe::initialize`] resolves every source field to a table column
//! ordinal once per write session; [`RecordSerDe::deserialize`] then coerces
//! each record into a [`Row`] whose slots follow the table's column order.
//!
//! ```
//! use hive3stream_core::{MapRecord, RecordDataType, RecordField, RecordSchema, Value};
//! use hive3stream_serde::{RecordSerDe, RowValue, TableProperties};
//!
//! let properties =
//!     TableProperties::from_properties([("columns", "id,name"), ("columns.types", "int,string")])
//!         .unwrap();
//! let schema = RecordSchema::new(vec![
//!     RecordField::new("ID", RecordDataType::String, true),
//!     RecordField::new("name", RecordDataType::String, true),
//! ]);
//! let mut serde = RecordSerDe::initialize(&properties, &schema).unwrap();
//!
//! let record = MapRecord::new(schema, [("ID", Value::string("7")), ("name", Value::string("x"))]);
//! let row = serde.deserialize(&record).unwrap();
//! assert_eq!(row.get(0), Some(&RowValue::Int(7)));
//! assert_eq!(serde.stats().row_count(), 1);
//! ```

mod error;
mod position;
mod properties;
mod record_serde;
mod row;
mod table;
mod timestamp;
pub mod type_info;

pub use error::{ConfigError, ConversionError, FieldError};
pub use position::{FieldPosition, FieldPositionMap, INTERNAL_COLUMN_PREFIX, internal_column_name};
pub use properties::{
    COLUMN_NAME_DELIMITER, DECIMAL_MODE, DEFAULT_COLUMN_NAME_DELIMITER, DecimalMode, LIST_COLUMN_TYPES,
    LIST_COLUMNS, TIMESTAMP_FORMATS, TableProperties, split_and_unescape, split_column_names,
};
pub use record_serde::{RecordSerDe, SerDeStats};
pub use row::{Row, RowValue};
pub use table::{Column, TableSchema};
pub use timestamp::{MILLIS_FORMAT, TimestampParser};
pub use type_info::{PrimitiveType, StructField, TypeInfo, parse_type_list};
