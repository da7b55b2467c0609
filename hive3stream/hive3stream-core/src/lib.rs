//! Encoding-agnostic record model for `hive3stream`.
//!
//! This crate provides the self-describing side of the adapter: the
//! [`Value`] / [`RecordDataType`] intermediate representation, the
//! [`Record`] trait with its typed accessors, and an in-memory
//! [`MapRecord`] implementation.

mod error;
mod record;
mod schema;
mod value;

pub use error::{RecordError, ValueError};
pub use record::{MapRecord, Record};
pub use schema::{RecordDataType, RecordField, RecordSchema, format_record_schema};
pub use value::{DEFAULT_DATE_FORMAT, DEFAULT_TIMESTAMP_FORMATS, Value, parse_timestamp};
