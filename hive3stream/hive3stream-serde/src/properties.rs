//! Table properties consumed when the adapter is initialized.

use std::{collections::HashMap, fmt, str::FromStr};

use crate::{error::ConfigError, type_info::parse_type_list, type_info::TypeInfo};

/// Column names, separated by [`COLUMN_NAME_DELIMITER`] (default `,`).
pub const LIST_COLUMNS: &str = "columns";
/// Column types, see [`parse_type_list`].
pub const LIST_COLUMN_TYPES: &str = "columns.types";
/// Override for the column-name separator.
pub const COLUMN_NAME_DELIMITER: &str = "column.name.delimiter";
/// Comma-separated timestamp formats; `\` escapes a literal comma.
pub const TIMESTAMP_FORMATS: &str = "timestamp.formats";
/// `double` (default) or `exact`.
pub const DECIMAL_MODE: &str = "decimal.mode";

pub const DEFAULT_COLUMN_NAME_DELIMITER: &str = ",";

/// How decimal columns are populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecimalMode {
    /// Approximate the value as a 64-bit float. Lossy; kept for compatibility
    /// with rows written by earlier connector versions.
    #[default]
    Double,
    /// Keep an exact decimal rounded to the column's declared scale.
    Exact,
}

impl DecimalMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecimalMode::Double => "double",
            DecimalMode::Exact => "exact",
        }
    }
}

impl FromStr for DecimalMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "double" => Ok(DecimalMode::Double),
            "exact" => Ok(DecimalMode::Exact),
            other => Err(format!(
                "unknown decimal mode '{other}', expected 'double' or 'exact'"
            )),
        }
    }
}

impl fmt::Display for DecimalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved table configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TableProperties {
    pub column_names: Vec<String>,
    pub column_types: Vec<TypeInfo>,
    pub timestamp_formats: Vec<String>,
    pub decimal_mode: DecimalMode,
}

impl TableProperties {
    pub fn new(column_names: Vec<String>, column_types: Vec<TypeInfo>) -> Self {
        Self {
            column_names,
            column_types,
            timestamp_formats: Vec::new(),
            decimal_mode: DecimalMode::default(),
        }
    }

    pub fn with_timestamp_formats(mut self, formats: Vec<String>) -> Self {
        self.timestamp_formats = formats;
        self
    }

    pub fn with_decimal_mode(mut self, mode: DecimalMode) -> Self {
        self.decimal_mode = mode;
        self
    }

    /// Build from raw key/value table properties.
    ///
    /// `columns` and `columns.types` are required; unknown keys are ignored.
    pub fn from_properties<K, V>(
        properties: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, ConfigError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let props: HashMap<String, String> = properties
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let names = props
            .get(LIST_COLUMNS)
            .ok_or(ConfigError::MissingProperty { key: LIST_COLUMNS })?;
        let types = props
            .get(LIST_COLUMN_TYPES)
            .ok_or(ConfigError::MissingProperty {
                key: LIST_COLUMN_TYPES,
            })?;
        let delimiter = match props.get(COLUMN_NAME_DELIMITER) {
            Some(d) if d.is_empty() => {
                return Err(ConfigError::InvalidProperty {
                    key: COLUMN_NAME_DELIMITER,
                    value: d.clone(),
                    detail: "delimiter must not be empty".to_string(),
                });
            }
            Some(d) => d.as_str(),
            None => DEFAULT_COLUMN_NAME_DELIMITER,
        };
        let decimal_mode = match props.get(DECIMAL_MODE) {
            Some(mode) => mode
                .parse()
                .map_err(|detail| ConfigError::InvalidProperty {
                    key: DECIMAL_MODE,
                    value: mode.clone(),
                    detail,
                })?,
            None => DecimalMode::default(),
        };

        Ok(Self {
            column_names: split_column_names(names, delimiter),
            column_types: parse_type_list(types)?,
            timestamp_formats: props
                .get(TIMESTAMP_FORMATS)
                .map(|s| split_and_unescape(s, ',', '\\'))
                .unwrap_or_default(),
            decimal_mode,
        })
    }
}

/// Split a column-name property. Trailing empty names are dropped, so an
/// empty property declares no columns.
pub fn split_column_names(names: &str, delimiter: &str) -> Vec<String> {
    let mut columns: Vec<String> = names.split(delimiter).map(str::to_string).collect();
    while columns.last().is_some_and(String::is_empty) {
        columns.pop();
    }
    columns
}

/// Split `s` on unescaped `separator` and drop the escape characters.
///
/// `escape` makes the following character literal, so with `,` and `\`
/// the input `a\,b,c` yields `["a,b", "c"]`. A trailing lone escape is kept.
pub fn split_and_unescape(s: &str, separator: char, escape: char) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == escape {
            match chars.next() {
                Some(next) => current.push(next),
                None => current.push(escape),
            }
        } else if c == separator {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    parts.push(current);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_and_unescape_keeps_escaped_separators() {
        assert_eq!(
            split_and_unescape(r"a\,b,c", ',', '\\'),
            vec!["a,b".to_string(), "c".to_string()]
        );
        assert_eq!(split_and_unescape(r"x\\,y", ',', '\\'), vec![r"x\", "y"]);
        assert_eq!(split_and_unescape(r"tail\", ',', '\\'), vec![r"tail\"]);
        assert!(split_and_unescape("", ',', '\\').is_empty());
    }

    #[test]
    fn split_column_names_honours_delimiter() {
        assert_eq!(split_column_names("a|b", "|"), vec!["a", "b"]);
        assert!(split_column_names("", ",").is_empty());
    }

    #[test]
    fn split_column_names_drops_trailing_empty_names() {
        assert_eq!(split_column_names("a,b,", ","), vec!["a", "b"]);
        assert_eq!(split_column_names("a,,b,,", ","), vec!["a", "", "b"]);
        assert!(split_column_names(",,", ",").is_empty());
    }
}
