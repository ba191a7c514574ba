use crate::api::request::BrandForm;
use crate::api::response::{ActionResponse, SavedBrand};
use crate::api::state::AppState;
use crate::data::catalog::Catalog;
use crate::data::models::brand::Brand;
use crate::services::errors::ServiceError;
use crate::storage::{object_path, Bucket, ObjectStorage};
use crate::utils::page_cache::PageCache;
use std::sync::Arc;

pub struct BrandService {
    catalog: Catalog,
    storage: Arc<dyn ObjectStorage>,
    cache: PageCache,
}

impl BrandService {
    pub fn new(state: &AppState) -> Self {
        BrandService {
            catalog: state.catalog.clone(),
            storage: Arc::clone(&state.storage),
            cache: state.cache.clone(),
        }
    }

    pub async fn brands(&self) -> Result<Vec<Brand>, ServiceError> {
        self.catalog
            .brands()
            .await
            .map_err(|e| ServiceError::data("Failed to load brands", e))
    }

    pub async fn brand(&self, id: &str) -> Result<Brand, ServiceError> {
        self.catalog
            .brand(id)
            .await
            .map_err(|e| ServiceError::data("Failed to load brand", e))?
            .ok_or_else(|| ServiceError::NotFound("Brand not found.".to_string()))
    }

    /// A new logo file replaces `currentLogo`; without one the current logo
    /// is kept.
    pub async fn save_brand(
        &self,
        form: BrandForm,
    ) -> Result<ActionResponse<SavedBrand>, ServiceError> {
        let logo = match form.logo.as_ref().filter(|f| !f.is_empty()) {
            Some(file) => {
                let path = object_path(Bucket::BrandLogos, &file.file_name);
                let url = self
                    .storage
                    .upload(
                        Bucket::BrandLogos,
                        &path,
                        file.bytes.clone(),
                        file.content_type.as_deref(),
                    )
                    .await
                    .map_err(|e| ServiceError::upload("Logo upload failed", e))?;
                Some(url)
            }
            None => form.current_logo.clone(),
        };

        let brand = match form.id {
            Some(id) => {
                self.brand(&id).await?;

                let brand = Brand {
                    id,
                    name: form.name,
                    logo,
                };
                self.catalog
                    .update_brand(brand.clone())
                    .await
                    .map_err(|e| ServiceError::data("Failed to save brand", e))?;
                brand
            }
            None => self
                .catalog
                .insert_brand(&form.name, logo)
                .await
                .map_err(|e| ServiceError::data("Failed to save brand", e))?,
        };

        tracing::info!("Brand {} saved ({})", brand.name, brand.id);
        self.cache.revalidate("/brands");

        Ok(ActionResponse::with_data(
            Some("Brand saved successfully"),
            SavedBrand { brand },
        ))
    }

    /// Removes the stored logo (best effort), then the brand.
    pub async fn delete_brand(&self, id: &str) -> Result<ActionResponse, ServiceError> {
        let brand = self.brand(id).await?;

        if let Some(logo) = brand.logo {
            self.storage.remove_urls(Bucket::BrandLogos, &[logo]).await;
        }

        self.catalog
            .delete_brand(id)
            .await
            .map_err(|e| ServiceError::data("Failed to delete brand", e))?;

        tracing::info!("Brand {} deleted", id);
        self.cache.revalidate("/brands");

        Ok(ActionResponse::success("Brand deleted successfully"))
    }
}
