use std::error::Error;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::csv_utils::{read_commands, write_outcomes};
use crate::{Engine, StoreConfig};

/// Replays the session script at `input_path` and writes one outcome row per
/// command (one per ride for history commands) to the provided writer.
///
/// # Arguments
/// * `input_path` - Path to the input CSV file containing commands
/// * `config` - Bucket counts for the rider and driver directories
/// * `writer` - Where to write the outcomes (e.g. stdout)
///
/// # Errors
/// Returns an error if:
/// * The input file cannot be read
/// * The CSV is malformed
/// * Writing to the output fails
pub fn run<P, W>(input_path: P, config: &StoreConfig, writer: W) -> Result<(), Box<dyn Error>>
where
    P: AsRef<Path>,
    W: Write,
{
    let mut engine = Engine::new(config);
    let mut rows = Vec::new();

    for command in read_commands(input_path)? {
        // CSV parsing errors are critical - propagate them
        let command = command?;
        engine.process_command(command, &mut rows);
    }
    info!(
        riders = engine.service().rider_count(),
        drivers = engine.service().driver_count(),
        "session script finished"
    );

    write_outcomes(writer, &rows)?;
    Ok(())
}
