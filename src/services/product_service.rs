use crate::api::form::UploadedFile;
use crate::api::request::ProductForm;
use crate::api::response::{ActionResponse, SavedProduct};
use crate::api::state::AppState;
use crate::data::catalog::Catalog;
use crate::data::models::category::Category;
use crate::data::models::product::{Product, ProductDraft, ProductOptions};
use crate::services::errors::ServiceError;
use crate::storage::{object_path, Bucket, ObjectStorage};
use crate::utils::page_cache::PageCache;
use std::sync::Arc;

/// Pages that show product data: listings, every detail page (related
/// products), and review pages (related product names).
const PRODUCT_PAGES: [&str; 6] = [
    "/admin/products",
    "/products",
    "/product",
    "/reviews",
    "/review",
    "/home",
];

pub struct ProductService {
    catalog: Catalog,
    storage: Arc<dyn ObjectStorage>,
    cache: PageCache,
}

impl ProductService {
    pub fn new(state: &AppState) -> Self {
        ProductService {
            catalog: state.catalog.clone(),
            storage: Arc::clone(&state.storage),
            cache: state.cache.clone(),
        }
    }

    /// Back-office listing, most popular first.
    pub async fn admin_products(&self) -> Result<Vec<Product>, ServiceError> {
        let mut products = self
            .catalog
            .products()
            .await
            .map_err(|e| ServiceError::data("Failed to load products", e))?;

        products.sort_by(|a, b| b.popularity.cmp(&a.popularity));
        Ok(products)
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, ServiceError> {
        self.catalog
            .product(id)
            .await
            .map_err(|e| ServiceError::data("Failed to load product", e))?
            .ok_or_else(|| ServiceError::NotFound("Product not found.".to_string()))
    }

    /// Uploads the main image, then gallery images, then files sent under
    /// the older `images` name, and inserts the product.
    pub async fn add_product(
        &self,
        form: ProductForm,
    ) -> Result<ActionResponse<SavedProduct>, ServiceError> {
        let files: Vec<&UploadedFile> = form
            .main_image
            .iter()
            .chain(&form.gallery_images)
            .chain(&form.legacy_images)
            .collect();
        let images = self.upload_images(&files).await?;

        let category = self.resolve_category(&form).await?;
        let product = self
            .catalog
            .insert_product(draft(form, category, images))
            .await
            .map_err(|e| ServiceError::data("Failed to add product", e))?;

        tracing::info!("Product {} added ({})", product.name, product.id);

        self.cache.revalidate_all(&PRODUCT_PAGES);

        Ok(ActionResponse::with_data(None, SavedProduct { product }))
    }

    /// Keeps the listed existing images and appends new uploads: main image
    /// first, then gallery images, then files sent as `newImages`.
    pub async fn update_product(
        &self,
        id: &str,
        form: ProductForm,
    ) -> Result<ActionResponse<SavedProduct>, ServiceError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ServiceError::validation("Product ID is missing."));
        }
        self.get_product(id).await?;

        let files: Vec<&UploadedFile> = form
            .main_image
            .iter()
            .chain(&form.gallery_images)
            .chain(&form.new_images)
            .collect();
        let uploaded = self.upload_images(&files).await?;

        let mut images = form.existing_images.clone();
        images.extend(uploaded);

        let category = self.resolve_category(&form).await?;
        self.catalog
            .update_product(id, draft(form, category, images))
            .await
            .map_err(|e| ServiceError::data("Failed to update product", e))?;

        tracing::info!("Product {} updated", id);

        self.cache.revalidate_all(&PRODUCT_PAGES);

        let product = self.get_product(id).await?;
        Ok(ActionResponse::with_data(None, SavedProduct { product }))
    }

    /// Removes the stored images (best effort), then the product.
    pub async fn delete_product(&self, id: &str) -> Result<ActionResponse, ServiceError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ServiceError::validation("Product ID is missing."));
        }

        let product = self.get_product(id).await?;
        self.storage
            .remove_urls(Bucket::ProductImages, &product.images)
            .await;

        self.catalog
            .delete_product(id)
            .await
            .map_err(|e| ServiceError::data("Failed to delete product", e))?;

        tracing::info!("Product {} deleted", id);

        self.cache.revalidate_layout();

        Ok(ActionResponse::success("Product deleted successfully."))
    }

    async fn upload_images(&self, files: &[&UploadedFile]) -> Result<Vec<String>, ServiceError> {
        let mut urls = Vec::with_capacity(files.len());

        for file in files.iter().filter(|f| !f.is_empty()) {
            let path = object_path(Bucket::ProductImages, &file.file_name);
            let url = self
                .storage
                .upload(
                    Bucket::ProductImages,
                    &path,
                    file.bytes.clone(),
                    file.content_type.as_deref(),
                )
                .await
                .map_err(|e| ServiceError::upload("Image upload failed", e))?;
            urls.push(url);
        }

        Ok(urls)
    }

    async fn resolve_category(&self, form: &ProductForm) -> Result<Option<Category>, ServiceError> {
        self.catalog
            .resolve_category(form.category_id.as_deref(), form.category.as_deref())
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    ServiceError::validation("Category not found.")
                } else {
                    ServiceError::data("Failed to resolve category", e)
                }
            })
    }
}

fn draft(form: ProductForm, category: Option<Category>, images: Vec<String>) -> ProductDraft {
    ProductDraft {
        name: form.name,
        category,
        price: form.price,
        images,
        description: form.description,
        specifications: form.specifications,
        care: form.care,
        stock_status: form.stock_status,
        status: form.status,
        color: form.color,
        material: form.material,
        options: ProductOptions {
            colors: form.colors,
            materials: form.materials,
        },
        redirect_link: form.redirect_link,
        is_featured: form.is_featured,
        is_new: form.is_new,
        popularity: form.popularity,
    }
}
