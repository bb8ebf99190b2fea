use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;

use crate::storage::{ObjectStore, StoreError};

/// Object store backed by an S3 bucket.
///
/// Authentication comes from the default AWS credentials chain; only the
/// region is selected explicitly.
pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub async fn connect(region: &str) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        Self {
            client: Client::new(&sdk_config),
        }
    }
}

impl ObjectStore for S3Store {
    async fn put(&self, bucket: &str, key: &str, payload: Vec<u8>) -> Result<(), StoreError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(payload))
            .send()
            .await
            .map_err(|error| StoreError::put(bucket, key, DisplayErrorContext(&error)))?;

        Ok(())
    }
}
