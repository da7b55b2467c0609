use std::str::FromStr;

use anyhow::Result;
use clap::Args;
use hive3stream_serde::{
    COLUMN_NAME_DELIMITER, DECIMAL_MODE, DecimalMode, LIST_COLUMN_TYPES, LIST_COLUMNS,
    TIMESTAMP_FORMATS, TableProperties,
};

/// Target table definition shared by all subcommands.
#[derive(Args)]
pub struct TableArgs {
    /// Column names, e.g. "id,name,ts"
    #[arg(short, long)]
    columns: String,

    /// Column types, e.g. "int,string,timestamp"
    #[arg(short, long)]
    types: String,

    /// Separator of the column names
    #[arg(long)]
    delimiter: Option<String>,

    /// Extra timestamp formats, comma separated; "millis" reads epoch milliseconds
    #[arg(long)]
    timestamp_formats: Option<String>,

    /// Decimal representation: double | exact
    #[arg(long, value_parser = parse_decimal_mode)]
    decimal_mode: Option<DecimalMode>,
}

impl TableArgs {
    /// Build table properties through the same keys the connector receives.
    pub fn properties(&self) -> Result<TableProperties> {
        let mut props = vec![
            (LIST_COLUMNS, self.columns.clone()),
            (LIST_COLUMN_TYPES, self.types.clone()),
        ];
        if let Some(delimiter) = &self.delimiter {
            props.push((COLUMN_NAME_DELIMITER, delimiter.clone()));
        }
        if let Some(formats) = &self.timestamp_formats {
            props.push((TIMESTAMP_FORMATS, formats.clone()));
        }
        if let Some(mode) = self.decimal_mode {
            props.push((DECIMAL_MODE, mode.to_string()));
        }
        Ok(TableProperties::from_properties(props)?)
    }
}

fn parse_decimal_mode(raw: &str) -> Result<DecimalMode, String> {
    DecimalMode::from_str(raw)
}
