use crate::api::request::ProductQuery;
use crate::api::response::{
    CategoryPageResponse, HomeResponse, ProductDetailResponse, ProductListResponse,
    ReviewDetailResponse, SearchResponse,
};
use crate::api::state::AppState;
use crate::browse::filter::{filter_by_category_slug, related_products, Facets};
use crate::browse::search::search_products;
use crate::data::catalog::Catalog;
use crate::data::content::{JsonDocument, SiteContent};
use crate::data::models::brand::Brand;
use crate::data::models::category::Category;
use crate::data::models::product::{Product, ProductStatus};
use crate::data::models::review::Review;
use crate::services::errors::ServiceError;
use crate::utils::page_cache::PageCache;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

pub const RELATED_LIMIT: usize = 4;
pub const HOME_SHELF_LIMIT: usize = 8;

/// A page body already rendered to JSON, possibly served from the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedJson(pub String);

impl IntoResponse for CachedJson {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "application/json")], self.0).into_response()
    }
}

/// Public catalog pages. Bodies are cached per path and query until an
/// admin action revalidates them.
pub struct StorefrontService {
    catalog: Catalog,
    content: Arc<JsonDocument<SiteContent>>,
    cache: PageCache,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ServiceError> {
    serde_json::to_string(value).map_err(|e| {
        tracing::error!("Failed to serialize page: {}", e);
        ServiceError::Internal("Failed to render page.".to_string())
    })
}

fn shelf(products: &[Product], pick: impl Fn(&Product) -> bool) -> Vec<Product> {
    products
        .iter()
        .filter(|p| pick(p))
        .take(HOME_SHELF_LIMIT)
        .cloned()
        .collect()
}

impl StorefrontService {
    pub fn new(state: &AppState) -> Self {
        StorefrontService {
            catalog: state.catalog.clone(),
            content: Arc::clone(&state.content),
            cache: state.cache.clone(),
        }
    }

    /// Serves `key` from the cache, rendering and storing it on a miss.
    /// Failures are never cached.
    pub async fn page<T, F>(&self, key: &str, render: F) -> Result<CachedJson, ServiceError>
    where
        T: Serialize,
        F: Future<Output = Result<T, ServiceError>>,
    {
        if let Some(body) = self.cache.get(key) {
            tracing::debug!("Page cache hit: {}", key);
            return Ok(CachedJson(body));
        }

        let body = to_json(&render.await?)?;
        self.cache.insert(key, body.clone());
        Ok(CachedJson(body))
    }

    /// Products shoppers may see; archived ones are hidden.
    pub async fn visible_products(&self) -> Result<Vec<Product>, ServiceError> {
        let products = self
            .catalog
            .products()
            .await
            .map_err(|e| ServiceError::data("Failed to load products", e))?;

        Ok(products
            .into_iter()
            .filter(|p| p.status != ProductStatus::Archived)
            .collect())
    }

    pub async fn reviews(&self) -> Result<Vec<Review>, ServiceError> {
        self.catalog
            .reviews()
            .await
            .map_err(|e| ServiceError::data("Failed to load reviews", e))
    }

    pub async fn home(&self) -> Result<HomeResponse, ServiceError> {
        let content = self.content.read_or_default().await;
        let reviews = self.reviews().await?;
        let products = self.visible_products().await?;

        Ok(HomeResponse {
            content,
            reviews,
            featured: shelf(&products, |p| p.is_featured),
            new_arrivals: shelf(&products, |p| p.is_new),
        })
    }

    /// Every visible product, refined by the query. Facets describe the
    /// unrefined listing.
    pub async fn products(&self, query: &ProductQuery) -> Result<ProductListResponse, ServiceError> {
        let products = self.visible_products().await?;
        let facets = Facets::from_products(&products);
        let filter = query.to_filter(&facets)?;

        Ok(ProductListResponse {
            products: filter.apply(&products),
            facets,
        })
    }

    /// Products whose category matches `slug`. The page title comes from
    /// the first match, so a slug nothing matches is a missing page.
    pub async fn category_page(
        &self,
        slug: &str,
        query: &ProductQuery,
    ) -> Result<CategoryPageResponse, ServiceError> {
        let products = filter_by_category_slug(&self.visible_products().await?, slug);

        let category_name = products
            .first()
            .map(|p| p.category.clone())
            .ok_or_else(|| ServiceError::NotFound("Category not found.".to_string()))?;

        let facets = Facets::from_products(&products);
        let filter = query.to_filter(&facets)?;

        Ok(CategoryPageResponse {
            slug: slug.to_string(),
            category_name,
            products: filter.apply(&products),
            facets,
        })
    }

    pub async fn product_detail(&self, id: &str) -> Result<ProductDetailResponse, ServiceError> {
        let products = self.visible_products().await?;
        let product = products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound("Product not found.".to_string()))?;

        Ok(ProductDetailResponse {
            related: related_products(&products, &product, RELATED_LIMIT),
            product,
        })
    }

    pub async fn search(&self, query: &str) -> Result<SearchResponse, ServiceError> {
        let query = query.trim();
        let results = search_products(&self.visible_products().await?, query);

        Ok(SearchResponse {
            query: query.to_string(),
            results,
        })
    }

    /// The review plus up to four others in stored order.
    pub async fn review_detail(&self, id: &str) -> Result<ReviewDetailResponse, ServiceError> {
        let reviews = self.reviews().await?;
        let review = reviews
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound("Review not found.".to_string()))?;

        let others = reviews
            .into_iter()
            .filter(|r| r.id != id)
            .take(RELATED_LIMIT)
            .collect();

        Ok(ReviewDetailResponse { review, others })
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ServiceError> {
        self.catalog
            .categories()
            .await
            .map_err(|e| ServiceError::data("Failed to load categories", e))
    }

    pub async fn brands(&self) -> Result<Vec<Brand>, ServiceError> {
        self.catalog
            .brands()
            .await
            .map_err(|e| ServiceError::data("Failed to load brands", e))
    }
}
