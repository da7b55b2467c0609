use std::{
    fmt::{Display, Formatter, Result},
    ops::Deref,
};

/// Declared type of a record field.
///
/// Date and timestamp types carry the format (strftime syntax) their textual
/// values are written in, when the record reader knows it.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordDataType {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Decimal { precision: u32, scale: u32 },
    String,
    Char,
    Date { format: Option<String> },
    Timestamp { format: Option<String> },
    Array(Box<RecordDataType>),
    Map(Box<RecordDataType>),
    Record(RecordSchema),
}

impl RecordDataType {
    pub fn is_primitive(&self) -> bool {
        !matches!(
            self,
            RecordDataType::Array(_) | RecordDataType::Map(_) | RecordDataType::Record(_)
        )
    }

    /// Declared format of date and timestamp types.
    pub fn format(&self) -> Option<&str> {
        match self {
            RecordDataType::Date { format } | RecordDataType::Timestamp { format } => {
                format.as_deref()
            }
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            RecordDataType::Boolean => "boolean",
            RecordDataType::Byte => "byte",
            RecordDataType::Short => "short",
            RecordDataType::Int => "int",
            RecordDataType::Long => "long",
            RecordDataType::Float => "float",
            RecordDataType::Double => "double",
            RecordDataType::Decimal { .. } => "decimal",
            RecordDataType::String => "string",
            RecordDataType::Char => "char",
            RecordDataType::Date { .. } => "date",
            RecordDataType::Timestamp { .. } => "timestamp",
            RecordDataType::Array(_) => "array",
            RecordDataType::Map(_) => "map",
            RecordDataType::Record(_) => "record",
        }
    }
}

/// Ordered field list describing a record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordSchema(pub Vec<RecordField>);

impl RecordSchema {
    pub fn new(fields: Vec<RecordField>) -> Self {
        Self(fields)
    }

    pub fn as_slice(&self) -> &[RecordField] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordField> {
        self.0.iter()
    }

    /// Look up a field by its exact name.
    pub fn field(&self, name: &str) -> Option<&RecordField> {
        self.0.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|f| f.name.as_str())
    }
}

impl From<Vec<RecordField>> for RecordSchema {
    fn from(value: Vec<RecordField>) -> Self {
        Self(value)
    }
}

impl From<RecordSchema> for Vec<RecordField> {
    fn from(value: RecordSchema) -> Self {
        value.0
    }
}

impl AsRef<[RecordField]> for RecordSchema {
    fn as_ref(&self) -> &[RecordField] {
        self.as_slice()
    }
}

impl Deref for RecordSchema {
    type Target = [RecordField];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl Display for RecordSchema {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = super::format_record_schema(self.as_slice())?;
        f.write_str(&text)
    }
}

/// Named, typed field of a [`RecordSchema`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    pub name: String,
    pub data_type: RecordDataType,
    pub nullable: bool,
}

impl RecordField {
    pub fn new(name: impl Into<String>, data_type: RecordDataType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable,
        }
    }
}
