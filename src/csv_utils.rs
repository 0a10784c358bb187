//! CSV reading of session scripts and writing of outcome rows.

use std::io::Write;
use std::path::Path;

use crate::dto::{Command, OutcomeRow};

/// Opens a session script and yields its commands lazily, fields trimmed.
pub fn read_commands<P>(path: P) -> csv::Result<impl Iterator<Item = csv::Result<Command>>>
where
    P: AsRef<Path>,
{
    Ok(csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?
        .into_deserialize())
}

/// Writes outcome rows, header first, and flushes the writer.
pub fn write_outcomes<W>(writer: W, rows: &[OutcomeRow]) -> csv::Result<()>
where
    W: Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
