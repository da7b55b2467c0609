use std::fmt::{Display, Formatter, Result};

/// Precision used by a bare `decimal` column.
pub const DEFAULT_DECIMAL_PRECISION: u32 = 10;
/// Scale used by a bare `decimal` column.
pub const DEFAULT_DECIMAL_SCALE: u32 = 0;
/// Largest precision a decimal column may declare.
pub const MAX_DECIMAL_PRECISION: u32 = 38;
/// Longest declarable `varchar`.
pub const MAX_VARCHAR_LENGTH: u32 = 65535;
/// Longest declarable `char`.
pub const MAX_CHAR_LENGTH: u32 = 255;

/// Declared type of a table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeInfo {
    Primitive(PrimitiveType),
    List(Box<TypeInfo>),
    Map {
        key: Box<TypeInfo>,
        value: Box<TypeInfo>,
    },
    Struct(Vec<StructField>),
    Union(Vec<TypeInfo>),
}

/// Scalar column types of the table store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Void,
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    Varchar(u32),
    Char(u32),
    Binary,
    Date,
    Timestamp,
    TimestampLocalTz,
    Decimal { precision: u32, scale: u32 },
    IntervalYearMonth,
    IntervalDayTime,
}

/// Named member of a `struct<...>` column type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    pub name: String,
    pub type_info: TypeInfo,
}

impl StructField {
    pub fn new(name: impl Into<String>, type_info: TypeInfo) -> Self {
        Self {
            name: name.into(),
            type_info,
        }
    }
}

impl TypeInfo {
    pub fn primitive(p: PrimitiveType) -> Self {
        Self::Primitive(p)
    }

    pub fn list(elem: TypeInfo) -> Self {
        Self::List(Box::new(elem))
    }

    pub fn map(key: TypeInfo, value: TypeInfo) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeInfo::Primitive(_))
    }

    pub fn category(&self) -> &'static str {
        match self {
            TypeInfo::Primitive(_) => "primitive",
            TypeInfo::List(_) => "list",
            TypeInfo::Map { .. } => "map",
            TypeInfo::Struct(_) => "struct",
            TypeInfo::Union(_) => "union",
        }
    }
}

impl PrimitiveType {
    pub fn type_name(&self) -> &'static str {
        match self {
            PrimitiveType::Void => "void",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "tinyint",
            PrimitiveType::Short => "smallint",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "bigint",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::String => "string",
            PrimitiveType::Varchar(_) => "varchar",
            PrimitiveType::Char(_) => "char",
            PrimitiveType::Binary => "binary",
            PrimitiveType::Date => "date",
            PrimitiveType::Timestamp => "timestamp",
            PrimitiveType::TimestampLocalTz => "timestamp with local time zone",
            PrimitiveType::Decimal { .. } => "decimal",
            PrimitiveType::IntervalYearMonth => "interval_year_month",
            PrimitiveType::IntervalDayTime => "interval_day_time",
        }
    }
}

impl Display for PrimitiveType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            PrimitiveType::Varchar(len) => write!(f, "varchar({len})"),
            PrimitiveType::Char(len) => write!(f, "char({len})"),
            PrimitiveType::Decimal { precision, scale } => {
                write!(f, "decimal({precision},{scale})")
            }
            other => f.write_str(other.type_name()),
        }
    }
}

impl Display for TypeInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            TypeInfo::Primitive(p) => write!(f, "{p}"),
            TypeInfo::List(elem) => write!(f, "array<{elem}>"),
            TypeInfo::Map { key, value } => write!(f, "map<{key},{value}>"),
            TypeInfo::Struct(fields) => {
                f.write_str("struct<")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}:{}", field.name, field.type_info)?;
                }
                f.write_str(">")
            }
            TypeInfo::Union(members) => {
                f.write_str("uniontype<")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{member}")?;
                }
                f.write_str(">")
            }
        }
    }
}
