use crate::api::request::CategoryRequest;
use crate::api::response::{ActionResponse, SavedCategory};
use crate::api::state::AppState;
use crate::data::catalog::Catalog;
use crate::data::models::category::Category;
use crate::services::errors::ServiceError;
use crate::utils::page_cache::PageCache;

pub struct CategoryService {
    catalog: Catalog,
    cache: PageCache,
}

impl CategoryService {
    pub fn new(state: &AppState) -> Self {
        CategoryService {
            catalog: state.catalog.clone(),
            cache: state.cache.clone(),
        }
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ServiceError> {
        self.catalog
            .categories()
            .await
            .map_err(|e| ServiceError::data("Failed to load categories", e))
    }

    pub async fn category(&self, id: &str) -> Result<Category, ServiceError> {
        self.catalog
            .category(id)
            .await
            .map_err(|e| ServiceError::data("Failed to load category", e))?
            .ok_or_else(|| ServiceError::NotFound("Category not found.".to_string()))
    }

    /// Inserts when no id is given, otherwise updates that category.
    pub async fn save_category(
        &self,
        request: CategoryRequest,
    ) -> Result<ActionResponse<SavedCategory>, ServiceError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ServiceError::validation("Category name is required."));
        }
        let description = request
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let category = match request.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => {
                self.category(id).await?;

                let category = Category {
                    id: id.to_string(),
                    name: name.to_string(),
                    description,
                };
                self.catalog
                    .update_category(category.clone())
                    .await
                    .map_err(|e| ServiceError::data("Failed to save category", e))?;
                category
            }
            None => self
                .catalog
                .insert_category(name, description)
                .await
                .map_err(|e| ServiceError::data("Failed to save category", e))?,
        };

        tracing::info!("Category {} saved ({})", category.name, category.id);

        // Listings show the category name.
        self.cache.revalidate_all(&["/products", "/product", "/home"]);

        Ok(ActionResponse::with_data(
            Some("Category saved successfully"),
            SavedCategory { category },
        ))
    }

    /// Products keep pointing at a deleted category.
    pub async fn delete_category(&self, id: &str) -> Result<ActionResponse, ServiceError> {
        self.catalog
            .delete_category(id)
            .await
            .map_err(|e| ServiceError::data("Failed to delete category", e))?;

        tracing::info!("Category {} deleted", id);
        self.cache.revalidate_all(&["/products", "/product", "/home"]);

        Ok(ActionResponse::success("Category deleted successfully"))
    }
}
