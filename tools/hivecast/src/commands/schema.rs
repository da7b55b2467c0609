use std::{fmt::Write as _, fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use hive3stream_core::{Record, format_record_schema};
use hive3stream_serde::RecordSerDe;

use super::read_lines;
use crate::{json::parse_record, table::TableArgs};

#[derive(Args)]
pub struct SchemaArgs {
    /// Path to the JSON-lines record file; the first record is inspected
    input: PathBuf,

    #[command(flatten)]
    table: TableArgs,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SchemaArgs {
    pub fn run(self) -> Result<()> {
        let properties = self.table.properties()?;
        let (_, first) = read_lines(&self.input)?
            .next()
            .with_context(|| format!("no records found in {}", self.input.display()))??;
        let record = parse_record(&first)?;
        let serde = RecordSerDe::initialize(&properties, record.schema())?;

        let mut text = String::from("record:\n");
        text.push_str(&format_record_schema(record.schema())?);

        text.push_str("table:\n");
        for (ordinal, column) in serde.table_schema().columns().iter().enumerate() {
            writeln!(text, "{ordinal}: {} {}", column.name, column.type_info)?;
        }

        text.push_str("positions:\n");
        for (field, ordinal) in serde.positions().mapped() {
            writeln!(text, "{field} -> {ordinal}")?;
        }
        for field in serde.positions().unmapped() {
            writeln!(text, "{field} -> unmapped")?;
        }

        match self.output {
            Some(path) => fs::write(path, text)?,
            None => print!("{text}"),
        }
        Ok(())
    }
}
