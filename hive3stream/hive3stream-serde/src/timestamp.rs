//! Timestamp resolution for timestamp columns.

use chrono::{DateTime, NaiveDateTime};
use hive3stream_core::{Value, ValueError, parse_timestamp};

use crate::error::FieldError;

/// Pseudo-format accepting a decimal count of milliseconds since the epoch.
pub const MILLIS_FORMAT: &str = "millis";

/// Parses raw field values into timestamps.
///
/// Text is tried against the field's declared format, then the default
/// `YYYY-MM-DD HH:MM:SS[.fffffffff]` forms, then each configured format in
/// order. Formats use strftime syntax and may omit the time of day;
/// [`MILLIS_FORMAT`] reads epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimestampParser {
    formats: Vec<String>,
}

impl TimestampParser {
    pub fn new(formats: Vec<String>) -> Self {
        Self {
            formats: formats
                .into_iter()
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect(),
        }
    }

    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    pub fn parse(
        &self,
        value: &Value,
        field_format: Option<&str>,
    ) -> Result<Option<NaiveDateTime>, FieldError> {
        match value.to_timestamp(field_format) {
            Err(ValueError::Unparseable { input, .. }) => self
                .parse_configured(input.trim())
                .map(Some)
                .ok_or(FieldError::Timestamp { input }),
            other => other.map_err(FieldError::from),
        }
    }

    fn parse_configured(&self, text: &str) -> Option<NaiveDateTime> {
        self.formats.iter().find_map(|format| {
            if format.eq_ignore_ascii_case(MILLIS_FORMAT) {
                text.parse::<i64>()
                    .ok()
                    .and_then(DateTime::from_timestamp_millis)
                    .map(|dt| dt.naive_utc())
            } else {
                parse_timestamp(text, format)
            }
        })
    }
}
