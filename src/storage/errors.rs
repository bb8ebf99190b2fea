use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Object put failed for [{bucket}/{key}]: {message}")]
    Put {
        bucket: String,
        key: String,
        message: String,
    },
}

impl StoreError {
    pub fn put(bucket: &str, key: &str, cause: impl Display) -> Self {
        Self::Put {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message: cause.to_string(),
        }
    }
}
