use crate::api::form::UploadedFile;
use crate::api::request::{ReviewForm, ReviewRecordRequest};
use crate::api::response::{ActionResponse, SavedReview, SignedUploadResponse};
use crate::api::state::AppState;
use crate::data::catalog::Catalog;
use crate::data::models::review::{Creator, Review, ReviewDraft};
use crate::services::errors::ServiceError;
use crate::storage::{object_path, Bucket, ObjectStorage};
use crate::utils::page_cache::PageCache;
use std::path::{Component, Path};
use std::sync::Arc;

const REVIEW_PAGES: [&str; 3] = ["/reviews", "/review", "/home"];

pub struct ReviewService {
    catalog: Catalog,
    storage: Arc<dyn ObjectStorage>,
    cache: PageCache,
}

impl ReviewService {
    pub fn new(state: &AppState) -> Self {
        ReviewService {
            catalog: state.catalog.clone(),
            storage: Arc::clone(&state.storage),
            cache: state.cache.clone(),
        }
    }

    pub async fn reviews(&self) -> Result<Vec<Review>, ServiceError> {
        self.catalog
            .reviews()
            .await
            .map_err(|e| ServiceError::data("Failed to load reviews", e))
    }

    pub async fn get_review(&self, id: &str) -> Result<Review, ServiceError> {
        self.catalog
            .review(id)
            .await
            .map_err(|e| ServiceError::data("Failed to load review", e))?
            .ok_or_else(|| ServiceError::NotFound("Review not found.".to_string()))
    }

    /// Creates a review whose video is uploaded through this request.
    pub async fn create_review_with_video(
        &self,
        form: ReviewForm,
    ) -> Result<ActionResponse<SavedReview>, ServiceError> {
        let video = form
            .video
            .as_ref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ServiceError::validation("Video file is required."))?;

        let video_url = self.upload_video(video).await?;
        let review = self.insert(draft(&form, video_url)).await?;

        Ok(ActionResponse::with_data(
            Some("Review created successfully!"),
            SavedReview { review },
        ))
    }

    /// Reserves an object path and a signed URL the client uploads the video
    /// to directly, bypassing the request body limit.
    pub async fn signed_review_upload_url(
        &self,
        file_name: &str,
    ) -> Result<ActionResponse<SignedUploadResponse>, ServiceError> {
        let path = object_path(Bucket::ReviewVideos, file_name);

        let signed_url = self
            .storage
            .create_signed_upload_url(Bucket::ReviewVideos, &path)
            .await
            .map_err(|e| ServiceError::upload("Failed to create signed upload URL", e))?;
        let public_url = self.storage.public_url(Bucket::ReviewVideos, &path);

        Ok(ActionResponse::with_data(
            None,
            SignedUploadResponse {
                signed_url,
                path,
                public_url,
            },
        ))
    }

    /// Registers a review after a direct upload to `video_path`.
    pub async fn create_review_record(
        &self,
        request: ReviewRecordRequest,
    ) -> Result<ActionResponse<SavedReview>, ServiceError> {
        let video_path = request.video_path.trim();
        let valid_path = !video_path.is_empty()
            && Path::new(video_path)
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !valid_path {
            return Err(ServiceError::validation("A valid video path is required."));
        }
        if request.creator_name.trim().is_empty() {
            return Err(ServiceError::validation("Creator name is required."));
        }

        let review = self
            .insert(ReviewDraft {
                creator: Creator {
                    name: request.creator_name.trim().to_string(),
                    handle: request.creator_handle.trim().to_string(),
                    avatar: None,
                },
                video_url: self.storage.public_url(Bucket::ReviewVideos, video_path),
                thumbnail: String::new(),
                overlay_text: request.overlay_text.unwrap_or_default(),
                review_text: request.review_text.unwrap_or_default(),
                related_product_ids: request.related_product_ids,
            })
            .await?;

        Ok(ActionResponse::with_data(None, SavedReview { review }))
    }

    /// A replacement video is uploaded first; the previous object is then
    /// removed best effort.
    pub async fn update_review(
        &self,
        id: &str,
        form: ReviewForm,
    ) -> Result<ActionResponse<SavedReview>, ServiceError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ServiceError::validation("Review ID is missing."));
        }

        let existing = self.get_review(id).await?;
        let current_url = form
            .existing_video_url
            .clone()
            .unwrap_or_else(|| existing.video_url.clone());

        let video_url = match form.video.as_ref().filter(|v| !v.is_empty()) {
            Some(video) => {
                let url = self.upload_video(video).await?;
                if !current_url.is_empty() {
                    self.storage
                        .remove_urls(Bucket::ReviewVideos, &[current_url])
                        .await;
                }
                url
            }
            None => current_url,
        };

        self.catalog
            .update_review(id, draft(&form, video_url))
            .await
            .map_err(|e| ServiceError::data("Failed to update review", e))?;

        tracing::info!("Review {} updated", id);
        self.cache.revalidate_all(&REVIEW_PAGES);

        let review = self.get_review(id).await?;
        Ok(ActionResponse::with_data(None, SavedReview { review }))
    }

    /// Removes the stored video (best effort), then the review.
    pub async fn delete_review(&self, id: &str) -> Result<ActionResponse, ServiceError> {
        let review = self.get_review(id).await?;

        if !review.video_url.is_empty() {
            self.storage
                .remove_urls(Bucket::ReviewVideos, &[review.video_url.clone()])
                .await;
        }

        self.catalog.delete_review(id).await.map_err(|e| {
            tracing::error!("Error deleting review: {}", e);
            ServiceError::Data("Failed to delete review".to_string())
        })?;

        tracing::info!("Review {} deleted", id);
        self.cache.revalidate_all(&REVIEW_PAGES);

        Ok(ActionResponse::success("Review deleted successfully"))
    }

    async fn upload_video(&self, video: &UploadedFile) -> Result<String, ServiceError> {
        let path = object_path(Bucket::ReviewVideos, &video.file_name);

        self.storage
            .upload(
                Bucket::ReviewVideos,
                &path,
                video.bytes.clone(),
                video.content_type.as_deref(),
            )
            .await
            .map_err(|e| ServiceError::upload("Video upload failed", e))
    }

    async fn insert(&self, draft: ReviewDraft) -> Result<Review, ServiceError> {
        let review = self
            .catalog
            .insert_review(draft)
            .await
            .map_err(|e| ServiceError::data("Failed to create review", e))?;

        tracing::info!("Review {} created for {}", review.id, review.creator.name);
        self.cache.revalidate_all(&REVIEW_PAGES);

        Ok(review)
    }
}

fn draft(form: &ReviewForm, video_url: String) -> ReviewDraft {
    ReviewDraft {
        creator: Creator {
            name: form.creator_name.clone(),
            handle: form.creator_handle.clone(),
            avatar: None,
        },
        video_url,
        thumbnail: form.thumbnail.clone(),
        overlay_text: form.overlay_text.clone(),
        review_text: form.review_text.clone(),
        related_product_ids: form.related_product_ids.clone(),
    }
}
