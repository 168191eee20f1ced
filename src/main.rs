use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use regionstat::{Aggregator, ApiServer, DatasetStore, FileSource, Overrides, Settings};

#[derive(Parser, Debug)]
#[command(name = "regionstat")]
#[command(about = "Serve per-region latency statistics over HTTP")]
struct Args {
    /// Path to a config file (TOML, JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on (host:port)
    #[arg(short, long)]
    listen: Option<String>,

    /// Path to the observations JSON file
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Path of the statistics endpoint
    #[arg(long)]
    api_path: Option<String>,

    /// Log filter used when RUST_LOG is not set (e.g. "info", "regionstat=debug")
    #[arg(long)]
    log_level: Option<String>,

    /// Load the dataset, print a summary and exit without serving
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let overrides = Overrides {
        listen_addr: args.listen,
        api_path: args.api_path,
        data_file: args.data,
        log_level: args.log_level,
    };
    let settings = Settings::load(args.config.as_deref(), &overrides)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let source = FileSource::new(&settings.data_file);
    let outcome = DatasetStore::load(&source);

    if args.check {
        return check(outcome);
    }

    let store = Arc::new(outcome.into_store());
    info!(dataset = %store, "Dataset ready");

    let server = ApiServer::new(settings.server_config(), Aggregator::new(store))?;
    let listener = server.bind().await?;

    tokio::select! {
        result = server.serve(listener) => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutting down"),
    }

    Ok(())
}

/// Report what was loaded and exit non-zero if the dataset fell back to empty.
fn check(outcome: regionstat::LoadOutcome) -> Result<()> {
    match outcome.report() {
        Ok(report) => {
            print!("{}", report);
            Ok(())
        }
        Err(error) => {
            warn!(%error, "Dataset check failed");
            Err(anyhow::anyhow!("dataset unavailable: {}", error))
        }
    }
}
