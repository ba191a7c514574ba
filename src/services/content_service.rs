use crate::api::response::ActionResponse;
use crate::api::state::AppState;
use crate::data::content::{JsonDocument, SiteContent, SiteSettings};
use crate::services::errors::ServiceError;
use crate::utils::page_cache::PageCache;
use std::sync::Arc;

/// Storefront copy and site settings, always kept in local files.
pub struct ContentService {
    content: Arc<JsonDocument<SiteContent>>,
    site_settings: Arc<JsonDocument<SiteSettings>>,
    cache: PageCache,
}

impl ContentService {
    pub fn new(state: &AppState) -> Self {
        ContentService {
            content: Arc::clone(&state.content),
            site_settings: Arc::clone(&state.site_settings),
            cache: state.cache.clone(),
        }
    }

    pub async fn get_content(&self) -> SiteContent {
        self.content.read_or_default().await
    }

    pub async fn update_content(&self, content: SiteContent) -> Result<ActionResponse, ServiceError> {
        self.content.write(&content).await.map_err(|e| {
            tracing::error!("Failed to write content file: {}", e);
            ServiceError::Data("Failed to update content.".to_string())
        })?;

        self.cache.revalidate_layout();
        Ok(ActionResponse::success("Content updated successfully."))
    }

    pub async fn get_site_settings(&self) -> SiteSettings {
        self.site_settings.read_or_default().await
    }

    pub async fn save_site_settings(
        &self,
        settings: SiteSettings,
    ) -> Result<ActionResponse, ServiceError> {
        self.site_settings.write(&settings).await.map_err(|e| {
            tracing::error!("Failed to write site settings file: {}", e);
            ServiceError::Data("Failed to update site settings.".to_string())
        })?;

        self.cache.revalidate_layout();
        Ok(ActionResponse::success("Site settings updated successfully."))
    }
}
