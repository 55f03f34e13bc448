//! Local indicator files: one indicator per line.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::client::Record;

/// Overwrite `path` with one line per record, in order, duplicates kept.
///
/// The parent directory is created if it does not exist.
pub fn write_records(path: &Path, records: &[Record]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }
    let file = File::create(path)
        .with_context(|| format!("failed to open {} for writing", path.display()))?;
    let mut out = BufWriter::new(file);
    for record in records {
        writeln!(out, "{}", record.indicator)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    out.flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    Ok(())
}

/// Read candidate indicators, one per line. A missing file yields nothing.
pub fn read_candidates(path: &Path) -> Result<Vec<String>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no candidate file");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to open {}", path.display()));
        }
    };
    BufReader::new(file)
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("failed to read {}", path.display()))
}
