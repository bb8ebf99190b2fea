#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::Rng;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::info;

use crate::generator::{RecordFactory, build_batch};
use crate::keys::{build_filename, build_key};
use crate::storage::{DEFAULT_MAX_RETRIES, ObjectStore, maybe_write_local, upload_with_retry};

/// Effective runtime configuration for the feed loop.
#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub bucket: String,
    pub prefix: String,
    pub batch_size: usize,
    pub interval: Duration,
    pub partitioned: bool,
    pub outdir: Option<PathBuf>,
}

/// Why [`FeedDriver::run`] returned successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    UserRequested,
}

/// Drives the generate → upload → mirror cycle on a fixed interval.
///
/// The loop has three outcomes: it keeps running, it stops cleanly with
/// [`StopReason::UserRequested`] when the shutdown channel fires, or it
/// stops with an error when any step of an iteration fails (upload retries
/// exhausted, mirror write failure, serialization failure). A failed
/// iteration loses its batch; there is no durable queue or resumption.
pub struct FeedDriver<S: ObjectStore, R: Rng> {
    settings: FeedSettings,
    store: S,
    factory: RecordFactory,
    rng: R,
}

impl<S: ObjectStore, R: Rng> FeedDriver<S, R> {
    pub fn new(settings: FeedSettings, store: S, factory: RecordFactory, rng: R) -> Self {
        Self {
            settings,
            store,
            factory,
            rng,
        }
    }

    /// Runs iterations until shutdown is requested or an iteration fails.
    ///
    /// The shutdown channel is checked at iteration boundaries and honored
    /// by the inter-batch sleep; an in-flight upload is never cancelled
    /// mid-flight. A dropped shutdown sender counts as a stop request, since
    /// the loop could otherwise no longer be told to stop.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> Result<StopReason> {
        loop {
            if *shutdown.borrow() {
                return Ok(StopReason::UserRequested);
            }

            let key = self.run_iteration().await?;

            info!(
                "Uploaded {} rows to s3://{}/{}",
                self.settings.batch_size, self.settings.bucket, key
            );

            tokio::select! {
                _ = sleep(self.settings.interval) => {}
                _ = shutdown.changed() => {
                    return Ok(StopReason::UserRequested);
                }
            }
        }
    }

    async fn run_iteration(&mut self) -> Result<String> {
        let payload = build_batch(&self.factory, &mut self.rng, self.settings.batch_size)
            .context("Batch serialization failed")?;

        let filename = build_filename(&mut self.rng);
        let key = build_key(&self.settings.prefix, &filename, self.settings.partitioned);

        upload_with_retry(
            &self.store,
            &self.settings.bucket,
            &key,
            &payload,
            DEFAULT_MAX_RETRIES,
        )
        .await
        .with_context(|| format!("Upload failed for [{key}]"))?;

        maybe_write_local(self.settings.outdir.as_deref(), &filename, &payload)
            .with_context(|| format!("Local mirror write failed for [{filename}]"))?;

        Ok(key)
    }
}
