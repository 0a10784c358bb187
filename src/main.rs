use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use rusty_rides::{run, run_async, StoreConfig};

const VERSION_STRING: &str = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));

/// Replays a rider/driver session script and prints the outcome of every command as CSV.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Session script (CSV)
    script: PathBuf,
    /// TOML file with `rider_buckets` / `driver_buckets`
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Use the async runner
    #[arg(long = "async")]
    use_async: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    if let Err(err) = run_app(Args::parse()) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn run_app(args: Args) -> Result<(), Box<dyn Error>> {
    info!("{VERSION_STRING}");
    let config = StoreConfig::load(args.config.as_deref())?;
    info!(
        rider_buckets = config.rider_buckets.get(),
        driver_buckets = config.driver_buckets.get(),
        "store configured"
    );

    if args.use_async {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime
            .block_on(run_async(&args.script, &config, std::io::stdout()))
            .map_err(|e| e.to_string())?;
        Ok(())
    } else {
        run(&args.script, &config, std::io::stdout())
    }
}
