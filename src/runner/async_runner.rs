use std::error::Error;
use std::io::Write;
use std::path::Path;

use crate::{
    csv_utils::write_outcomes,
    dto::{Command, OutcomeRow},
    Engine, StoreConfig,
};

use csv_async::{AsyncReaderBuilder, Error as CsvError, Trim};
use tokio::fs::File;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tracing::info;

const BUFFER_SIZE: usize = 1024;

type Result<T, E = Box<dyn Error + Send + Sync>> = std::result::Result<T, E>;

/// Replays the session script async and writes the outcomes to the provided writer.
/// Spawns two tasks:
/// * CSV reader - streams commands from the input file, deserializes them and sends them to the processor via channel.
/// * Processor - owns the engine, receives commands from the channel and processes them in order until the channel is closed.
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
pub async fn run<P, W>(input_path: P, config: &StoreConfig, writer: W) -> Result<()>
where
    P: AsRef<Path>,
    W: Write,
{
    // Create channel for passing commands from reader to processor
    let (tx, rx) = mpsc::channel(BUFFER_SIZE);
    let input_path = input_path.as_ref().to_owned();

    let reader_handle = tokio::spawn(read_commands(input_path, tx));
    let processor_handle = tokio::spawn(process_commands(Engine::new(config), rx));

    // Wait for reader to finish and propagate any errors
    reader_handle.await??;

    let rows = processor_handle.await?;
    write_outcomes(writer, &rows)?;
    Ok(())
}

/// Reads and deserializes commands from a CSV file.
/// Returns them through the provided channel.
async fn read_commands(
    input_path: impl AsRef<Path> + Send,
    tx: mpsc::Sender<Command>,
) -> Result<(), CsvError> {
    let file = File::open(input_path).await?;
    let mut csv_reader = AsyncReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .create_deserializer(file);

    let mut records = csv_reader.deserialize::<Command>();
    while let Some(result) = records.next().await {
        match result {
            Ok(command) => {
                if tx.send(command).await.is_err() {
                    // Receiver dropped, exit gracefully
                    break;
                }
            }
            // CSV parsing errors are critical - propagate them
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Processes commands received through the channel.
/// Returns the outcome rows once the channel is closed by the reader.
async fn process_commands(
    mut engine: Engine,
    mut rx: mpsc::Receiver<Command>,
) -> Vec<OutcomeRow> {
    let mut rows = Vec::new();
    while let Some(command) = rx.recv().await {
        engine.process_command(command, &mut rows);
    }
    info!(
        riders = engine.service().rider_count(),
        drivers = engine.service().driver_count(),
        "session script finished"
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_example_session() -> Result<()> {
        let mut output = Vec::new();
        run("data/example_session.csv", &StoreConfig::default(), &mut output).await?;

        let expected = tokio::fs::read_to_string("data/example_output.csv").await?;
        assert_eq!(String::from_utf8(output)?, expected);
        Ok(())
    }

    #[tokio::test]
    async fn test_matches_sync_runner() -> Result<()> {
        let config = StoreConfig::default();
        let mut async_output = Vec::new();
        run("data/example_session.csv", &config, &mut async_output).await?;

        let mut sync_output = Vec::new();
        crate::runner::run("data/example_session.csv", &config, &mut sync_output)
            .map_err(|e| e.to_string())?;

        assert_eq!(async_output, sync_output);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_input() {
        let mut output = Vec::new();
        let result = run("data/missing.csv", &StoreConfig::default(), &mut output).await;
        assert!(result.is_err());
        assert!(output.is_empty());
    }
}
