mod errors;
mod local_mirror;
mod s3_store;
mod uploader;

use std::future::Future;

pub use errors::StoreError;
pub use local_mirror::maybe_write_local;
pub use s3_store::S3Store;
pub use uploader::{DEFAULT_MAX_RETRIES, upload_with_retry};

/// Destination for batch payloads.
///
/// A single-attempt `put`; retry policy lives in [`upload_with_retry`].
/// Implementations must treat a repeated put to the same key as an
/// overwrite.
pub trait ObjectStore: Send + Sync {
    fn put(
        &self,
        bucket: &str,
        key: &str,
        payload: Vec<u8>,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
