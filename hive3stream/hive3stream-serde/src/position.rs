//! Resolution of record field names to table column ordinals.

use std::collections::{HashMap, HashSet};

use hive3stream_core::RecordSchema;
use tracing::{debug, error};

use crate::{error::ConfigError, table::TableSchema};

/// Prefix of the names the table store gives columns it could not otherwise name.
pub const INTERNAL_COLUMN_PREFIX: &str = "_col";

/// Internal name of the column at `position`, e.g. `_col3`.
pub fn internal_column_name(position: usize) -> String {
    format!("{INTERNAL_COLUMN_PREFIX}{position}")
}

/// Ordinal encoded by a name of the form `_col<digits>`, if it has that form.
///
/// Digits that overflow `usize` map to `usize::MAX`, which never re-encodes
/// to the same name.
fn internal_column_position(name: &str) -> Option<usize> {
    let digits = name.strip_prefix(INTERNAL_COLUMN_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse().unwrap_or(usize::MAX))
}

/// Where a record field lands in the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPosition {
    Column(usize),
    /// Partition columns and fields the table does not declare.
    Unmapped,
}

/// Case-insensitive mapping from record field name to column ordinal.
///
/// Built once per write session and read for every record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldPositionMap {
    positions: HashMap<String, FieldPosition>,
}

impl FieldPositionMap {
    /// Resolve every field of `source` against the table's columns.
    ///
    /// A field maps to the column with the same name ignoring case. Failing
    /// that, a field named `_col<N>` maps to ordinal N, provided the name is
    /// exactly the internal name of N and N addresses an existing column.
    /// An internal name whose column is already claimed by name, and anything
    /// else, is left unmapped, so no two fields share a column.
    pub fn resolve(table: &TableSchema, source: &RecordSchema) -> Result<Self, ConfigError> {
        let mut positions = HashMap::with_capacity(source.len());
        let mut claimed = HashSet::new();
        let mut remaining = Vec::new();

        for field in source.iter() {
            let normalized = field.name.to_lowercase();
            match table.position_of(&normalized) {
                Some(ordinal) => {
                    claimed.insert(ordinal);
                    positions.insert(normalized, FieldPosition::Column(ordinal));
                }
                None => remaining.push((field.name.as_str(), normalized)),
            }
        }

        for (field_name, normalized) in remaining {
            let position = match resolve_internal_name(table, field_name)? {
                FieldPosition::Column(ordinal) if claimed.contains(&ordinal) => {
                    debug!(
                        field = field_name,
                        position = ordinal,
                        "column is already claimed by name, ignoring internal column name"
                    );
                    FieldPosition::Unmapped
                }
                position => position,
            };
            positions.insert(normalized, position);
        }

        Ok(Self { positions })
    }

    /// Position of the named field. Names unknown at resolution are unmapped.
    pub fn position(&self, field_name: &str) -> FieldPosition {
        self.positions
            .get(field_name)
            .or_else(|| self.positions.get(&field_name.to_lowercase()))
            .copied()
            .unwrap_or(FieldPosition::Unmapped)
    }

    /// Column ordinal of the named field, if mapped.
    pub fn get(&self, field_name: &str) -> Option<usize> {
        match self.position(field_name) {
            FieldPosition::Column(ordinal) => Some(ordinal),
            FieldPosition::Unmapped => None,
        }
    }

    /// Number of mapped fields.
    pub fn len(&self) -> usize {
        self.mapped().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mapped `(normalized field name, ordinal)` pairs, ordered by ordinal.
    pub fn mapped(&self) -> impl Iterator<Item = (&str, usize)> {
        let mut mapped: Vec<(&str, usize)> = self
            .positions
            .iter()
            .filter_map(|(name, position)| match position {
                FieldPosition::Column(ordinal) => Some((name.as_str(), *ordinal)),
                FieldPosition::Unmapped => None,
            })
            .collect();
        mapped.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        mapped.into_iter()
    }

    /// Normalized names of fields left unmapped, sorted.
    pub fn unmapped(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .positions
            .iter()
            .filter(|(_, position)| **position == FieldPosition::Unmapped)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}

fn resolve_internal_name(
    table: &TableSchema,
    field_name: &str,
) -> Result<FieldPosition, ConfigError> {
    let Some(position) = internal_column_position(field_name) else {
        // Partition columns land here as well.
        debug!(field = field_name, "field is not found in the target table, ignoring");
        return Ok(FieldPosition::Unmapped);
    };

    debug!(
        field = field_name,
        position, "no column named like the field, treating it as an internal column name"
    );

    if !field_name.eq_ignore_ascii_case(&internal_column_name(position)) {
        error!(
            field = field_name,
            position, "internal column name and position encoding are at odds"
        );
        return Err(ConfigError::InternalNameMismatch {
            field: field_name.to_string(),
            position,
        });
    }

    if position >= table.len() {
        error!(
            field = field_name,
            position,
            columns = table.len(),
            "internal column name addresses a column past the end of the table"
        );
        return Err(ConfigError::PositionOutOfRange {
            field: field_name.to_string(),
            position,
            columns: table.len(),
        });
    }

    Ok(FieldPosition::Column(position))
}
