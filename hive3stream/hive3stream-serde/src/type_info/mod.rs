//! Column types of the target table and the grammar of the column-type property.

mod parser;
mod types;

pub use parser::parse_type_list;
pub use types::{
    DEFAULT_DECIMAL_PRECISION, DEFAULT_DECIMAL_SCALE, MAX_CHAR_LENGTH, MAX_DECIMAL_PRECISION,
    MAX_VARCHAR_LENGTH, PrimitiveType, StructField, TypeInfo,
};
