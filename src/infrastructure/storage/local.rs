use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use super::{MediaStore, StorageError};

/// Media store backed by a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    root: PathBuf,
    base_url: String,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        LocalMediaStore {
            root: root.into(),
            base_url: base_url.into(),
        }
    }

    /// Creates the root directory if it is missing.
    pub async fn ensure_root(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).await?;
        info!("Media root ready at {}", self.root.display());
        Ok(())
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(key);
        let is_plain = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));

        if !is_plain {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn save(&self, namespace: &str, extension: &str, content: &[u8]) -> Result<String, StorageError> {
        let key = format!("{}/{}.{}", namespace, Uuid::new_v4(), extension);
        let path = self.resolve(&key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, content).await?;

        debug!("Stored {} bytes at {}", content.len(), path.display());
        Ok(key)
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.resolve(key)?;
        fs::remove_file(&path).await?;
        Ok(())
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}{}", self.base_url, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn saves_under_namespace_and_deletes() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path(), "/media/");

        let key = store.save("images", "png", b"pixels").await.unwrap();

        assert!(key.starts_with("images/"));
        assert!(key.ends_with(".png"));
        assert_eq!(fs::read(dir.path().join(&key)).await.unwrap(), b"pixels");

        store.delete(&key).await.unwrap();
        assert!(!dir.path().join(&key).exists());
    }

    #[actix_rt::test]
    async fn rejects_keys_escaping_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path(), "/media/");

        assert!(matches!(store.delete("../etc/passwd").await, Err(StorageError::InvalidKey(_))));
        assert!(matches!(store.delete("/etc/passwd").await, Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn builds_public_url() {
        let store = LocalMediaStore::new("media", "/media/");
        assert_eq!(store.url_for("images/a.png"), "/media/images/a.png");
    }
}
