use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

use crate::storage::{ObjectStore, StoreError};

pub const DEFAULT_MAX_RETRIES: u32 = 3;

const BACKOFF_CAP_SECS: u64 = 8;

/// Uploads one payload, retrying failed attempts with exponential backoff.
///
/// Makes one initial attempt plus up to `max_retries` retries. The delay
/// before retry `attempt` (1-based) is `min(2^attempt, 8)` seconds. Every
/// store failure is treated as retryable; once retries are exhausted the
/// last error propagates to the caller.
pub async fn upload_with_retry<S: ObjectStore>(
    store: &S,
    bucket: &str,
    key: &str,
    payload: &[u8],
    max_retries: u32,
) -> Result<(), StoreError> {
    let mut attempt = 0u32;

    loop {
        match store.put(bucket, key, payload.to_vec()).await {
            Ok(()) => return Ok(()),
            Err(error) => {
                attempt += 1;

                if attempt > max_retries {
                    return Err(error);
                }

                let delay = Duration::from_secs(2u64.saturating_pow(attempt).min(BACKOFF_CAP_SECS));
                warn!(
                    "Upload attempt {attempt} failed for [{bucket}/{key}], retrying in {delay:?}: {error}"
                );
                sleep(delay).await;
            }
        }
    }
}
