use std::{
    fs,
    io::{self, BufWriter, Write},
    iter,
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Args;
use hive3stream_core::{MapRecord, Record};
use hive3stream_serde::RecordSerDe;
use tracing::{info, warn};

use super::read_lines;
use crate::{
    json::{parse_record, row_to_json},
    table::TableArgs,
};

#[derive(Args)]
pub struct ConvertArgs {
    /// Path to the JSON-lines record file
    input: PathBuf,

    #[command(flatten)]
    table: TableArgs,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log and skip records that fail to convert instead of aborting
    #[arg(long)]
    skip_invalid: bool,
}

impl ConvertArgs {
    pub fn run(self) -> Result<()> {
        let properties = self.table.properties()?;
        let mut dest: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(fs::File::create(path)?)),
            None => Box::new(BufWriter::new(io::stdout().lock())),
        };

        let mut records = read_lines(&self.input)?.map(|line| -> Result<(usize, MapRecord)> {
            let (line_no, text) = line?;
            let record = parse_record(&text)
                .with_context(|| format!("{}:{line_no}: invalid record", self.input.display()))?;
            Ok((line_no, record))
        });

        // The first record's schema drives column resolution.
        let first = records
            .next()
            .with_context(|| format!("no records found in {}", self.input.display()))??;
        let mut serde = RecordSerDe::initialize(&properties, first.1.schema())?;
        let mut skipped = 0usize;

        for item in iter::once(Ok(first)).chain(records) {
            let (line_no, record) = item?;
            match serde.deserialize(&record) {
                Ok(row) => writeln!(dest, "{}", row_to_json(&row))?,
                Err(err) if self.skip_invalid => {
                    warn!(line = line_no, error = %err, "skipping record");
                    skipped += 1;
                }
                Err(err) => {
                    return Err(err).with_context(|| {
                        format!("{}:{line_no}: record rejected", self.input.display())
                    });
                }
            }
        }
        dest.flush()?;

        info!(
            rows = serde.stats().row_count(),
            skipped, "conversion finished"
        );
        Ok(())
    }
}
