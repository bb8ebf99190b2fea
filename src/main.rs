mod driver;
mod generator;
mod keys;
mod models;
mod storage;

use std::io::stderr;
use std::path::PathBuf;
use std::process::exit;
use std::time::Duration;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::driver::{FeedDriver, FeedSettings, StopReason};
use crate::generator::{RecordFactory, ReferenceData};
use crate::storage::S3Store;

/// Generate synthetic FinTech transaction batches as CSV and stream them to S3.
#[derive(Debug, Parser)]
#[command(name = "transaction-feed")]
struct Cli {
    /// S3 bucket name (e.g., fintech-feed)
    #[arg(long)]
    bucket: String,

    /// S3 key prefix (case sensitive). Example: Data/transactions
    #[arg(long, default_value = "Data/transactions")]
    prefix: String,

    /// AWS region for the S3 client
    #[arg(long, default_value = "us-east-2")]
    region: String,

    /// Rows per CSV file
    #[arg(long, default_value_t = 200)]
    batch_size: usize,

    /// Seconds between uploads
    #[arg(long, default_value_t = 15)]
    interval: u64,

    /// If set, keys use date/hour partitions under the prefix
    #[arg(long)]
    partition: bool,

    /// Optional local folder that also receives each CSV (debugging/backup)
    #[arg(long)]
    outdir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging();

    info!(
        "Streaming CSV batches to s3://{}/{} every {}s | batch={} | partitioned={}",
        cli.bucket,
        cli.prefix,
        cli.interval,
        cli.batch_size,
        if cli.partition { "YES" } else { "NO" }
    );

    if let Some(outdir) = &cli.outdir {
        info!("Also writing local copies under: {}", outdir.display());
    }

    let store = S3Store::connect(&cli.region).await;

    let settings = FeedSettings {
        bucket: cli.bucket,
        prefix: cli.prefix,
        batch_size: cli.batch_size,
        interval: Duration::from_secs(cli.interval),
        partitioned: cli.partition,
        outdir: cli.outdir,
    };

    let (shutdown_sender, shutdown_receiver) = watch::channel(false);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender.send(true);
        }
    });

    let factory = RecordFactory::new(ReferenceData::default());
    let mut feed_driver = FeedDriver::new(settings, store, factory, StdRng::from_entropy());

    match feed_driver.run(shutdown_receiver).await {
        Ok(StopReason::UserRequested) => {
            info!("Stopped by user.");
        }
        Err(error) => {
            error!("{error:#}");
            exit(1);
        }
    }
}

fn setup_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
