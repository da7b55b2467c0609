pub mod convert;
pub mod schema;

use std::{
    fs,
    io::{BufRead, BufReader, Lines},
    path::Path,
};

use anyhow::{Context, Result};

/// Non-blank lines of a JSON-lines file, with their 1-based line numbers.
pub fn read_lines(path: &Path) -> Result<impl Iterator<Item = Result<(usize, String)>>> {
    let file = fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let lines: Lines<BufReader<fs::File>> = BufReader::new(file).lines();
    Ok(lines
        .enumerate()
        .map(|(i, line)| -> Result<(usize, String)> { Ok((i + 1, line?)) })
        .filter(|line| !matches!(line, Ok((_, text)) if text.trim().is_empty())))
}
