use crate::api::form::UploadedFile;
use crate::api::response::{ActionResponse, MediaImage};
use crate::api::state::AppState;
use crate::services::errors::ServiceError;
use std::io::ErrorKind;
use std::path::PathBuf;

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "svg"];

pub const MEDIA_URL_PREFIX: &str = "/images";

/// The media library: plain image files in one directory, served under
/// `/images`.
pub struct MediaService {
    dir: PathBuf,
}

fn is_image(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Rejects names that could leave the media directory.
fn checked_name(name: &str) -> Result<&str, ServiceError> {
    let name = name.trim();
    if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
        return Err(ServiceError::validation("Invalid file name."));
    }
    Ok(name)
}

impl MediaService {
    pub fn new(state: &AppState) -> Self {
        MediaService {
            dir: state.config.media_dir.clone(),
        }
    }

    /// Image files sorted by name. A missing directory is an empty library.
    pub async fn list_images(&self) -> Result<Vec<MediaImage>, ServiceError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                tracing::error!("Could not read the images directory: {}", e);
                return Err(ServiceError::Internal("Failed to list images.".to_string()));
            }
        };

        let mut images = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            tracing::error!("Could not read the images directory: {}", e);
            ServiceError::Internal("Failed to list images.".to_string())
        })? {
            let name = entry.file_name().to_string_lossy().to_string();
            if !is_image(&name) {
                continue;
            }

            let size = entry.metadata().await.map(|m| m.len()).unwrap_or_default();
            images.push(MediaImage {
                url: format!("{}/{}", MEDIA_URL_PREFIX, name),
                name,
                size,
            });
        }

        images.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(images)
    }

    /// Spaces in the file name become underscores.
    pub async fn upload_image(
        &self,
        file: Option<&UploadedFile>,
    ) -> Result<ActionResponse, ServiceError> {
        let file = file
            .filter(|f| !f.is_empty())
            .ok_or_else(|| ServiceError::validation("No file selected."))?;

        let sanitized = file.file_name.replace(' ', "_");
        let name = checked_name(&sanitized)?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| {
                tracing::error!("Could not create the images directory: {}", e);
                ServiceError::Internal("Failed to upload image.".to_string())
            })?;

        tokio::fs::write(self.dir.join(name), &file.bytes)
            .await
            .map_err(|e| {
                tracing::error!("Failed to write image {}: {}", name, e);
                ServiceError::Internal("Failed to upload image.".to_string())
            })?;

        tracing::info!("Image {} uploaded", name);
        Ok(ActionResponse::success("Image uploaded successfully."))
    }

    pub async fn delete_image(&self, name: &str) -> Result<ActionResponse, ServiceError> {
        let name = checked_name(name)?;

        tokio::fs::remove_file(self.dir.join(name))
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete image {}: {}", name, e);
                if e.kind() == ErrorKind::NotFound {
                    ServiceError::NotFound("Image not found.".to_string())
                } else {
                    ServiceError::Internal("Failed to delete image.".to_string())
                }
            })?;

        tracing::info!("Image {} deleted", name);
        Ok(ActionResponse::success("Image deleted successfully."))
    }
}
