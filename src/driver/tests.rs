use super::{FeedDriver, FeedSettings, StopReason};

use std::fs;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::tempdir;
use tokio::sync::watch;
use tokio::time::sleep;

use crate::generator::{RecordFactory, ReferenceData};
use crate::storage::{ObjectStore, StoreError};

/// Records every put without talking to a real backend.
struct RecordingStore {
    puts: Mutex<Vec<(String, String, usize)>>,
    fail_always: bool,
}

impl RecordingStore {
    fn new() -> Self {
        Self {
            puts: Mutex::new(Vec::new()),
            fail_always: false,
        }
    }

    fn failing() -> Self {
        Self {
            puts: Mutex::new(Vec::new()),
            fail_always: true,
        }
    }

    fn puts(&self) -> Vec<(String, String, usize)> {
        self.puts.lock().unwrap().clone()
    }
}

impl ObjectStore for &RecordingStore {
    async fn put(&self, bucket: &str, key: &str, payload: Vec<u8>) -> Result<(), StoreError> {
        self.puts
            .lock()
            .unwrap()
            .push((bucket.to_string(), key.to_string(), payload.len()));

        if self.fail_always {
            return Err(StoreError::put(bucket, key, "simulated outage"));
        }

        Ok(())
    }
}

fn create_settings(batch_size: usize) -> FeedSettings {
    FeedSettings {
        bucket: "feed-bucket".to_string(),
        prefix: "Data/transactions".to_string(),
        batch_size,
        interval: Duration::from_secs(1),
        partitioned: false,
        outdir: None,
    }
}

fn create_driver<'a>(
    settings: FeedSettings,
    store: &'a RecordingStore,
) -> FeedDriver<&'a RecordingStore, StdRng> {
    FeedDriver::new(
        settings,
        store,
        RecordFactory::new(ReferenceData::default()),
        StdRng::seed_from_u64(17),
    )
}

fn spawn_shutdown_after(sender: watch::Sender<bool>, delay: Duration) {
    tokio::spawn(async move {
        sleep(delay).await;
        let _ = sender.send(true);
    });
}

#[tokio::test(start_paused = true)]
async fn test_driver_uploads_once_per_interval_until_shutdown() -> Result<()> {
    let store = RecordingStore::new();
    let mut driver = create_driver(create_settings(3), &store);
    let (sender, receiver) = watch::channel(false);

    spawn_shutdown_after(sender, Duration::from_millis(3_500));

    let outcome = driver.run(receiver).await?;

    assert_eq!(outcome, StopReason::UserRequested);

    let puts = store.puts();
    assert_eq!(puts.len(), 4);

    for (bucket, key, _) in &puts {
        assert_eq!(bucket, "feed-bucket");
        assert!(key.starts_with("Data/transactions/transactions_"));
        assert!(key.ends_with(".csv"));
    }

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_driver_stops_before_the_first_batch_when_already_signalled() -> Result<()> {
    let store = RecordingStore::new();
    let mut driver = create_driver(create_settings(3), &store);
    let (sender, receiver) = watch::channel(false);

    sender.send(true)?;

    let outcome = driver.run(receiver).await?;

    assert_eq!(outcome, StopReason::UserRequested);
    assert!(store.puts().is_empty());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_driver_propagates_upload_exhaustion_as_fatal() {
    let store = RecordingStore::failing();
    let mut driver = create_driver(create_settings(2), &store);
    let (_sender, receiver) = watch::channel(false);

    let error = driver.run(receiver).await.expect_err("upload failure must be fatal");

    assert!(error.to_string().contains("Upload failed"));
    // 1 initial attempt + 3 retries, then the loop ends.
    assert_eq!(store.puts().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_driver_mirrors_each_batch_locally() -> Result<()> {
    let dir = tempdir()?;
    let store = RecordingStore::new();
    let mut settings = create_settings(5);
    settings.outdir = Some(dir.path().to_path_buf());
    let mut driver = create_driver(settings, &store);
    let (sender, receiver) = watch::channel(false);

    spawn_shutdown_after(sender, Duration::from_millis(500));

    driver.run(receiver).await?;

    let entries: Vec<_> = fs::read_dir(dir.path())?.collect::<std::io::Result<_>>()?;
    assert_eq!(entries.len(), 1);

    let filename = entries[0].file_name().into_string().unwrap();
    assert!(filename.starts_with("transactions_"));
    assert!(filename.ends_with(".csv"));

    let mirrored = fs::read_to_string(entries[0].path())?;
    assert_eq!(mirrored.lines().count(), 6);

    let uploaded_len = store.puts()[0].2;
    assert_eq!(mirrored.len(), uploaded_len);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_driver_builds_partitioned_keys_when_enabled() -> Result<()> {
    let store = RecordingStore::new();
    let mut settings = create_settings(1);
    settings.partitioned = true;
    let mut driver = create_driver(settings, &store);
    let (sender, receiver) = watch::channel(false);

    spawn_shutdown_after(sender, Duration::from_millis(500));

    driver.run(receiver).await?;

    let (_, key, _) = store.puts()[0].clone();
    assert!(key.starts_with("Data/transactions/date="));
    assert!(key.contains("/hour="));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_driver_uploads_header_only_payload_for_empty_batches() -> Result<()> {
    let store = RecordingStore::new();
    let mut driver = create_driver(create_settings(0), &store);
    let (sender, receiver) = watch::channel(false);

    spawn_shutdown_after(sender, Duration::from_millis(500));

    driver.run(receiver).await?;

    let header_line_len = crate::models::CSV_HEADERS.join(",").len() + 1;
    assert_eq!(store.puts()[0].2, header_line_len);

    Ok(())
}
