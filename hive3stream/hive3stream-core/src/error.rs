//! Error types for value coercion and record access.

/// Error returned when a [`Value`](crate::Value) cannot be coerced to the
/// requested representation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    /// The value's variant has no conversion to the requested type.
    #[error("expected {expected}, found {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// A textual value could not be parsed as the requested type.
    #[error("cannot parse {input:?} as {target}")]
    Unparseable { input: String, target: &'static str },

    /// A numeric value does not fit the requested type.
    #[error("{value} is out of range for {target}")]
    OutOfRange { value: String, target: &'static str },
}

/// Error returned by the typed accessors of [`Record`](crate::Record).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    /// The named field holds a value that cannot be coerced.
    #[error("field '{field}': {source}")]
    Field {
        field: String,
        #[source]
        source: ValueError,
    },
}

impl RecordError {
    /// Name of the field the error refers to.
    pub fn field(&self) -> &str {
        match self {
            RecordError::Field { field, .. } => field,
        }
    }
}
