//! Declared schema of self-describing records.

mod format;
mod types;

pub use format::format_record_schema;
pub use types::{RecordDataType, RecordField, RecordSchema};
