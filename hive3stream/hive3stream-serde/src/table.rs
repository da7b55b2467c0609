//! Target table schema.

use crate::{error::ConfigError, type_info::TypeInfo};

/// A column of the target table. Names are stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub type_info: TypeInfo,
}

/// Ordered columns of the target table, fixed for a write session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableSchema {
    columns: Vec<Column>,
}

impl TableSchema {
    /// Pair column names with their types.
    ///
    /// Fails when the two lists differ in length.
    pub fn new<S: AsRef<str>>(names: &[S], types: &[TypeInfo]) -> Result<Self, ConfigError> {
        if names.len() != types.len() {
            return Err(ConfigError::ColumnCountMismatch {
                names: names.len(),
                types: types.len(),
            });
        }

        let columns = names
            .iter()
            .zip(types)
            .map(|(name, type_info)| Column {
                name: name.as_ref().to_lowercase(),
                type_info: type_info.clone(),
            })
            .collect();
        Ok(Self { columns })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, ordinal: usize) -> Option<&Column> {
        self.columns.get(ordinal)
    }

    /// Ordinal of the column with the given (already lower-cased) name.
    pub fn position_of(&self, normalized_name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == normalized_name)
    }
}
