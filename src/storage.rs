pub mod hosted;
pub mod local;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{0}")]
    NotConfigured(String),
    #[error("Storage request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Storage rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Invalid object path: {0}")]
    InvalidPath(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    ProductImages,
    ReviewVideos,
    BrandLogos,
}

impl Bucket {
    pub fn name(&self) -> &'static str {
        match self {
            Bucket::ProductImages => "product-images",
            Bucket::ReviewVideos => "review-videos",
            Bucket::BrandLogos => "brand-logos",
        }
    }

    /// Folder inside the bucket new objects are written to.
    pub fn prefix(&self) -> &'static str {
        match self {
            Bucket::ProductImages => "products",
            Bucket::ReviewVideos => "reviews",
            Bucket::BrandLogos => "brands",
        }
    }

    pub fn default_extension(&self) -> &'static str {
        match self {
            Bucket::ProductImages => "jpg",
            Bucket::ReviewVideos => "mp4",
            Bucket::BrandLogos => "png",
        }
    }
}

/// Builds a collision-resistant object path: `{prefix}/{millis}-{uuid}.{ext}`.
pub fn object_path(bucket: Bucket, file_name: &str) -> String {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.trim().to_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| bucket.default_extension().to_string());

    format!(
        "{}/{}-{}.{}",
        bucket.prefix(),
        Utc::now().timestamp_millis(),
        Uuid::new_v4(),
        extension
    )
}

/// Recovers the stored object path from a public URL, absolute or
/// site-relative. Returns `None` for URLs outside the bucket.
pub fn object_path_from_url(url: &str, bucket: Bucket) -> Option<String> {
    let without_query = url.split(['?', '#']).next().unwrap_or_default();
    let marker = format!("/{}/", bucket.name());

    without_query
        .split_once(marker.as_str())
        .map(|(_, path)| path.trim_matches('/').to_string())
        .filter(|path| !path.is_empty())
}

/// Accepts a file, returns a public URL.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores the object and returns its public URL.
    async fn upload(
        &self,
        bucket: Bucket,
        path: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError>;

    async fn remove(&self, bucket: Bucket, paths: &[String]) -> Result<(), StorageError>;

    fn public_url(&self, bucket: Bucket, path: &str) -> String;

    /// Pre-authorized URL a client can upload to directly.
    async fn create_signed_upload_url(
        &self,
        bucket: Bucket,
        path: &str,
    ) -> Result<String, StorageError>;

    /// Best-effort removal of the objects behind public URLs. Failures are
    /// logged and swallowed.
    async fn remove_urls(&self, bucket: Bucket, urls: &[String]) {
        let paths: Vec<String> = urls
            .iter()
            .filter_map(|url| {
                let path = object_path_from_url(url, bucket);
                if path.is_none() {
                    tracing::warn!("Not a {} URL, skipping removal: {}", bucket.name(), url);
                }
                path
            })
            .collect();

        if paths.is_empty() {
            return;
        }

        if let Err(e) = self.remove(bucket, &paths).await {
            tracing::warn!("Could not remove objects from {}: {}", bucket.name(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_path_keeps_lowercased_extension() {
        let path = object_path(Bucket::ProductImages, "Sofa Front.JPEG");

        assert!(path.starts_with("products/"));
        assert!(path.ends_with(".jpeg"));
    }

    #[test]
    fn object_path_falls_back_to_bucket_extension() {
        assert!(object_path(Bucket::ReviewVideos, "clip").ends_with(".mp4"));
        assert!(object_path(Bucket::BrandLogos, "logo.").ends_with(".png"));
    }

    #[test]
    fn object_paths_do_not_collide() {
        let a = object_path(Bucket::ProductImages, "a.png");
        let b = object_path(Bucket::ProductImages, "a.png");

        assert_ne!(a, b);
    }

    #[test]
    fn path_is_recovered_from_public_urls() {
        let hosted = "https://x.example.co/storage/v1/object/public/review-videos/reviews/1-a.mp4";
        let local = "/uploads/review-videos/reviews/1-a.mp4?v=2";

        assert_eq!(
            object_path_from_url(hosted, Bucket::ReviewVideos).as_deref(),
            Some("reviews/1-a.mp4")
        );
        assert_eq!(
            object_path_from_url(local, Bucket::ReviewVideos).as_deref(),
            Some("reviews/1-a.mp4")
        );
        assert_eq!(object_path_from_url(hosted, Bucket::BrandLogos), None);
    }
}
