use std::{io, sync::Arc};

use async_trait::async_trait;
use derive_more::Display;

pub mod local;

/// Where uploaded media bytes live. Keys are relative, `/`-separated paths
/// such as `images/<uuid>.png`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Writes `content` under `namespace` and returns the new key.
    async fn save(&self, namespace: &str, extension: &str, content: &[u8]) -> Result<String, StorageError>;

    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Public URL for a stored key.
    fn url_for(&self, key: &str) -> String;
}

#[async_trait]
impl<T> MediaStore for Arc<T>
where
    T: MediaStore + ?Sized,
{
    async fn save(&self, namespace: &str, extension: &str, content: &[u8]) -> Result<String, StorageError> {
        (**self).save(namespace, extension, content).await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key).await
    }

    fn url_for(&self, key: &str) -> String {
        (**self).url_for(key)
    }
}

#[derive(Debug, Display)]
pub enum StorageError {
    #[display("Invalid storage key: {_0}")]
    InvalidKey(String),

    #[display("Media store I/O failed: {_0}")]
    Io(io::Error),
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl std::error::Error for StorageError {}
