use crate::storage::{Bucket, ObjectStorage, StorageError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Object storage on the local filesystem, used when the hosted service is
/// not configured. Files are served by the router under `public_prefix`.
pub struct LocalObjectStorage {
    root: PathBuf,
    public_prefix: String,
}

impl LocalObjectStorage {
    pub fn new(root: impl Into<PathBuf>, public_prefix: &str) -> Self {
        LocalObjectStorage {
            root: root.into(),
            public_prefix: public_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_file(&self, bucket: Bucket, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        let safe = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));

        if !safe {
            return Err(StorageError::InvalidPath(path.to_string()));
        }

        Ok(self.root.join(bucket.name()).join(relative))
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn upload(
        &self,
        bucket: Bucket,
        path: &str,
        bytes: Vec<u8>,
        _content_type: Option<&str>,
    ) -> Result<String, StorageError> {
        let file = self.object_file(bucket, path)?;

        if let Some(parent) = file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&file, bytes).await?;

        tracing::info!("Stored {} locally", file.display());

        Ok(self.public_url(bucket, path))
    }

    /// Removes every valid path in the batch. Invalid paths are skipped;
    /// the first filesystem error is returned once the batch is done.
    async fn remove(&self, bucket: Bucket, paths: &[String]) -> Result<(), StorageError> {
        let mut first_error = None;

        for path in paths {
            let file = match self.object_file(bucket, path) {
                Ok(file) => file,
                Err(e) => {
                    tracing::warn!("Skipping removal from {}: {}", bucket.name(), e);
                    continue;
                }
            };

            match tokio::fs::remove_file(&file).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!("Could not remove {}: {}", file.display(), e);
                    if first_error.is_none() {
                        first_error = Some(StorageError::from(e));
                    }
                }
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    fn public_url(&self, bucket: Bucket, path: &str) -> String {
        format!("{}/{}/{}", self.public_prefix, bucket.name(), path)
    }

    async fn create_signed_upload_url(
        &self,
        _bucket: Bucket,
        _path: &str,
    ) -> Result<String, StorageError> {
        Err(StorageError::NotConfigured(
            "Object storage is not configured for direct uploads.".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_then_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalObjectStorage::new(dir.path(), "/uploads/");

        let url = storage
            .upload(Bucket::BrandLogos, "brands/1-a.png", b"png".to_vec(), None)
            .await
            .unwrap();

        assert_eq!(url, "/uploads/brand-logos/brands/1-a.png");
        let stored = dir.path().join("brand-logos/brands/1-a.png");
        assert!(stored.exists());

        storage.remove_urls(Bucket::BrandLogos, &[url]).await;
        assert!(!stored.exists());
    }

    #[tokio::test]
    async fn rejects_paths_escaping_the_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalObjectStorage::new(dir.path(), "/uploads");

        let result = storage
            .upload(Bucket::ProductImages, "../secrets.txt", Vec::new(), None)
            .await;

        assert!(matches!(result, Err(StorageError::InvalidPath(_))));
    }

    #[tokio::test]
    async fn invalid_path_does_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalObjectStorage::new(dir.path(), "/uploads");
        for name in ["products/a.jpg", "products/b.jpg"] {
            storage
                .upload(Bucket::ProductImages, name, b"jpg".to_vec(), None)
                .await
                .unwrap();
        }

        let paths = vec![
            "products/a.jpg".to_string(),
            "../outside.jpg".to_string(),
            "products/b.jpg".to_string(),
        ];
        storage.remove(Bucket::ProductImages, &paths).await.unwrap();

        assert!(!dir.path().join("product-images/products/a.jpg").exists());
        assert!(!dir.path().join("product-images/products/b.jpg").exists());
    }

    #[tokio::test]
    async fn signed_upload_urls_need_hosted_storage() {
        let storage = LocalObjectStorage::new("unused", "/uploads");

        let result = storage
            .create_signed_upload_url(Bucket::ReviewVideos, "reviews/a.mp4")
            .await;

        assert!(matches!(result, Err(StorageError::NotConfigured(_))));
    }
}
