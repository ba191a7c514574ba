use crate::api::config::Config;
use crate::data::catalog::Catalog;
use crate::data::content::{JsonDocument, SiteContent, SiteSettings};
use crate::data::database::Database;
use crate::data::errors::DataError;
use crate::security::jwt::JwtService;
use crate::storage::hosted::HostedStorage;
use crate::storage::local::LocalObjectStorage;
use crate::storage::ObjectStorage;
use crate::utils::page_cache::PageCache;
use std::sync::Arc;

/// Shared handles every handler and service works with.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Catalog,
    pub storage: Arc<dyn ObjectStorage>,
    pub content: Arc<JsonDocument<SiteContent>>,
    pub site_settings: Arc<JsonDocument<SiteSettings>>,
    pub cache: PageCache,
    pub jwt: JwtService,
}

impl AppState {
    /// Picks the managed backend pieces that are configured and falls back
    /// to local files for the rest.
    pub fn from_config(config: Config) -> Result<Self, DataError> {
        let catalog = match &config.database_url {
            Some(url) => Catalog::remote(Database::connect(url)?),
            None => Catalog::local(&config.fixtures_dir),
        };

        let storage: Arc<dyn ObjectStorage> =
            match (&config.storage_url, &config.storage_service_key) {
                (Some(url), Some(key)) => Arc::new(HostedStorage::new(url, key)),
                _ => Arc::new(LocalObjectStorage::new(
                    &config.uploads_dir,
                    &config.uploads_public_path,
                )),
            };

        Ok(Self::with_parts(config, catalog, storage))
    }

    pub fn with_parts(config: Config, catalog: Catalog, storage: Arc<dyn ObjectStorage>) -> Self {
        AppState {
            content: Arc::new(JsonDocument::new(&config.content_file)),
            site_settings: Arc::new(JsonDocument::new(&config.site_settings_file)),
            jwt: JwtService::from_config(&config),
            cache: PageCache::new(),
            catalog,
            storage,
            config: Arc::new(config),
        }
    }
}
