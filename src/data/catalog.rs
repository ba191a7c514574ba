use crate::data::database::Database;
use crate::data::errors::DataError;
use crate::data::fixtures::FixtureStore;
use crate::data::models::brand::{Brand, BrandChanges, NewBrandRow};
use crate::data::models::category::{slugify, Category, CategoryChanges, NewCategoryRow};
use crate::data::models::product::{NewProductRow, Product, ProductChanges, ProductDraft};
use crate::data::models::review::{
    NewReviewRow, RelatedProduct, Review, ReviewChanges, ReviewDraft, ReviewRow,
};
use crate::data::repos::implementors::brand_repo::BrandRepo;
use crate::data::repos::implementors::category_repo::CategoryRepo;
use crate::data::repos::implementors::product_repo::ProductRepo;
use crate::data::repos::implementors::review_repo::ReviewRepo;
use crate::data::repos::traits::repository::Repository;
use chrono::Utc;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Persistence adapter used by every service: the managed Postgres backend
/// when one is configured, otherwise the local JSON fixtures.
#[derive(Clone)]
pub enum Catalog {
    Remote(Database),
    Local(Arc<FixtureStore>),
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl Catalog {
    pub fn remote(db: Database) -> Self {
        Catalog::Remote(db)
    }

    pub fn local(dir: impl AsRef<Path>) -> Self {
        Catalog::Local(Arc::new(FixtureStore::open(dir)))
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Catalog::Remote(_))
    }

    // --- products ---

    pub async fn products(&self) -> Result<Vec<Product>, DataError> {
        match self {
            Catalog::Remote(db) => ProductRepo::new(db.clone()).get_all().await,
            Catalog::Local(store) => store.products.get_all().await,
        }
    }

    pub async fn products_by_ids(&self, ids: &[String]) -> Result<Vec<Product>, DataError> {
        match self {
            Catalog::Remote(db) => ProductRepo::new(db.clone()).get_by_ids(ids).await,
            Catalog::Local(store) => Ok(store
                .products
                .get_all()
                .await?
                .into_iter()
                .filter(|p| ids.contains(&p.id))
                .collect()),
        }
    }

    pub async fn product(&self, id: &str) -> Result<Option<Product>, DataError> {
        match self {
            Catalog::Remote(db) => ProductRepo::new(db.clone()).get_by_id(id.to_string()).await,
            Catalog::Local(store) => store.products.get_by_id(id.to_string()).await,
        }
    }

    pub async fn insert_product(&self, draft: ProductDraft) -> Result<Product, DataError> {
        let product = draft.into_product(new_id(), Some(Utc::now()));

        match self {
            Catalog::Remote(db) => {
                ProductRepo::new(db.clone())
                    .add(NewProductRow::from(&product))
                    .await?
            }
            Catalog::Local(store) => store.products.add(product.clone()).await?,
        }

        Ok(product)
    }

    pub async fn update_product(&self, id: &str, draft: ProductDraft) -> Result<(), DataError> {
        match self {
            Catalog::Remote(db) => {
                ProductRepo::new(db.clone())
                    .update(id.to_string(), ProductChanges::from(&draft))
                    .await
            }
            Catalog::Local(store) => {
                let existing = store
                    .products
                    .get_by_id(id.to_string())
                    .await?
                    .ok_or_else(|| DataError::NotFound(format!("product {}", id)))?;
                let product = draft.into_product(id.to_string(), existing.created_at);
                store.products.update(id.to_string(), product).await
            }
        }
    }

    pub async fn delete_product(&self, id: &str) -> Result<(), DataError> {
        match self {
            Catalog::Remote(db) => ProductRepo::new(db.clone()).delete(id.to_string()).await,
            Catalog::Local(store) => store.products.delete(id.to_string()).await,
        }
    }

    // --- categories ---

    pub async fn categories(&self) -> Result<Vec<Category>, DataError> {
        match self {
            Catalog::Remote(db) => CategoryRepo::new(db.clone()).get_all().await,
            Catalog::Local(store) => store.categories.get_all().await,
        }
    }

    pub async fn category(&self, id: &str) -> Result<Option<Category>, DataError> {
        match self {
            Catalog::Remote(db) => CategoryRepo::new(db.clone()).get_by_id(id.to_string()).await,
            Catalog::Local(store) => store.categories.get_by_id(id.to_string()).await,
        }
    }

    pub async fn insert_category(
        &self,
        name: &str,
        description: Option<String>,
    ) -> Result<Category, DataError> {
        let category = Category {
            id: new_id(),
            name: name.to_string(),
            description,
        };

        match self {
            Catalog::Remote(db) => {
                CategoryRepo::new(db.clone())
                    .add(NewCategoryRow::from(&category))
                    .await?
            }
            Catalog::Local(store) => store.categories.add(category.clone()).await?,
        }

        Ok(category)
    }

    pub async fn update_category(&self, category: Category) -> Result<(), DataError> {
        match self {
            Catalog::Remote(db) => {
                CategoryRepo::new(db.clone())
                    .update(category.id.clone(), CategoryChanges::from(&category))
                    .await
            }
            Catalog::Local(store) => store.categories.update(category.id.clone(), category).await,
        }
    }

    pub async fn delete_category(&self, id: &str) -> Result<(), DataError> {
        match self {
            Catalog::Remote(db) => CategoryRepo::new(db.clone()).delete(id.to_string()).await,
            Catalog::Local(store) => store.categories.delete(id.to_string()).await,
        }
    }

    /// An explicit id wins and must exist. Otherwise the name is matched
    /// against existing categories by slug, and created when nothing matches.
    pub async fn resolve_category(
        &self,
        id: Option<&str>,
        name: Option<&str>,
    ) -> Result<Option<Category>, DataError> {
        if let Some(id) = id.map(str::trim).filter(|s| !s.is_empty()) {
            return self
                .category(id)
                .await?
                .map(Some)
                .ok_or_else(|| DataError::NotFound(format!("category {}", id)));
        }

        let Some(name) = name.filter(|s| !s.trim().is_empty()) else {
            return Ok(None);
        };

        let wanted = slugify(name);
        if let Some(found) = self
            .categories()
            .await?
            .into_iter()
            .find(|c| c.slug() == wanted)
        {
            return Ok(Some(found));
        }

        match self.insert_category(name, None).await {
            Ok(created) => {
                tracing::info!("Created category {} while saving a product", created.name);
                Ok(Some(created))
            }
            Err(e) => {
                tracing::warn!("Could not create category {}: {}", name, e);
                Ok(None)
            }
        }
    }

    // --- brands ---

    pub async fn brands(&self) -> Result<Vec<Brand>, DataError> {
        match self {
            Catalog::Remote(db) => BrandRepo::new(db.clone()).get_all().await,
            Catalog::Local(store) => store.brands.get_all().await,
        }
    }

    pub async fn brand(&self, id: &str) -> Result<Option<Brand>, DataError> {
        match self {
            Catalog::Remote(db) => BrandRepo::new(db.clone()).get_by_id(id.to_string()).await,
            Catalog::Local(store) => store.brands.get_by_id(id.to_string()).await,
        }
    }

    pub async fn insert_brand(&self, name: &str, logo: Option<String>) -> Result<Brand, DataError> {
        let brand = Brand {
            id: new_id(),
            name: name.to_string(),
            logo,
        };

        match self {
            Catalog::Remote(db) => BrandRepo::new(db.clone()).add(NewBrandRow::from(&brand)).await?,
            Catalog::Local(store) => store.brands.add(brand.clone()).await?,
        }

        Ok(brand)
    }

    pub async fn update_brand(&self, brand: Brand) -> Result<(), DataError> {
        match self {
            Catalog::Remote(db) => {
                BrandRepo::new(db.clone())
                    .update(brand.id.clone(), BrandChanges::from(&brand))
                    .await
            }
            Catalog::Local(store) => store.brands.update(brand.id.clone(), brand).await,
        }
    }

    pub async fn delete_brand(&self, id: &str) -> Result<(), DataError> {
        match self {
            Catalog::Remote(db) => BrandRepo::new(db.clone()).delete(id.to_string()).await,
            Catalog::Local(store) => store.brands.delete(id.to_string()).await,
        }
    }

    // --- reviews ---

    pub async fn reviews(&self) -> Result<Vec<Review>, DataError> {
        match self {
            Catalog::Remote(db) => {
                let rows = ReviewRepo::new(db.clone()).get_all().await?;
                self.attach_related(rows).await
            }
            Catalog::Local(store) => {
                let reviews = store.reviews.get_all().await?;
                self.refresh_related(reviews).await
            }
        }
    }

    pub async fn review(&self, id: &str) -> Result<Option<Review>, DataError> {
        match self {
            Catalog::Remote(db) => {
                match ReviewRepo::new(db.clone()).get_by_id(id.to_string()).await? {
                    Some(row) => Ok(self.attach_related(vec![row]).await?.pop()),
                    None => Ok(None),
                }
            }
            Catalog::Local(store) => match store.reviews.get_by_id(id.to_string()).await? {
                Some(review) => Ok(self.refresh_related(vec![review]).await?.pop()),
                None => Ok(None),
            },
        }
    }

    pub async fn insert_review(&self, draft: ReviewDraft) -> Result<Review, DataError> {
        let id = new_id();

        match self {
            Catalog::Remote(db) => {
                ReviewRepo::new(db.clone())
                    .add(NewReviewRow::from((id.as_str(), &draft)))
                    .await?;
            }
            Catalog::Local(store) => {
                let review = self.local_review(id.clone(), &draft, None).await?;
                store.reviews.add(review).await?;
            }
        }

        self.review(&id)
            .await?
            .ok_or_else(|| DataError::NotFound(format!("review {}", id)))
    }

    pub async fn update_review(&self, id: &str, draft: ReviewDraft) -> Result<(), DataError> {
        match self {
            Catalog::Remote(db) => {
                ReviewRepo::new(db.clone())
                    .update(id.to_string(), ReviewChanges::from(&draft))
                    .await
            }
            Catalog::Local(store) => {
                let existing = store
                    .reviews
                    .get_by_id(id.to_string())
                    .await?
                    .ok_or_else(|| DataError::NotFound(format!("review {}", id)))?;
                let review = self.local_review(id.to_string(), &draft, Some(existing)).await?;
                store.reviews.update(id.to_string(), review).await
            }
        }
    }

    pub async fn delete_review(&self, id: &str) -> Result<(), DataError> {
        match self {
            Catalog::Remote(db) => ReviewRepo::new(db.clone()).delete(id.to_string()).await,
            Catalog::Local(store) => store.reviews.delete(id.to_string()).await,
        }
    }

    /// Resolves related product ids to `{id, name, redirectLink}` in the
    /// order they were stored. Ids that no longer exist are dropped.
    async fn related_products(&self, ids: &[String]) -> Result<Vec<RelatedProduct>, DataError> {
        let found: HashMap<String, Product> = self
            .products_by_ids(ids)
            .await?
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();

        Ok(ids
            .iter()
            .filter_map(|id| found.get(id))
            .map(|p| RelatedProduct {
                id: p.id.clone(),
                name: p.name.clone(),
                redirect_link: p.redirect_link.clone(),
            })
            .collect())
    }

    /// Stored related entries carry a copy of the product name; re-read it
    /// from the current products so renames show up.
    async fn refresh_related(&self, reviews: Vec<Review>) -> Result<Vec<Review>, DataError> {
        let mut all_ids: Vec<String> = reviews
            .iter()
            .flat_map(Review::related_product_ids)
            .collect();
        all_ids.sort();
        all_ids.dedup();

        let related = self.related_products(&all_ids).await?;
        let by_id: HashMap<&str, &RelatedProduct> =
            related.iter().map(|p| (p.id.as_str(), p)).collect();

        Ok(reviews
            .into_iter()
            .map(|mut review| {
                review.related_products = review
                    .related_products
                    .iter()
                    .filter_map(|stale| by_id.get(stale.id.as_str()).map(|p| (*p).clone()))
                    .collect();
                review
            })
            .collect())
    }

    async fn attach_related(&self, rows: Vec<ReviewRow>) -> Result<Vec<Review>, DataError> {
        let mut all_ids: Vec<String> = rows
            .iter()
            .flat_map(|r| r.related_product_ids.iter().cloned())
            .collect();
        all_ids.sort();
        all_ids.dedup();

        let related = self.related_products(&all_ids).await?;
        let by_id: HashMap<&str, &RelatedProduct> =
            related.iter().map(|p| (p.id.as_str(), p)).collect();

        Ok(rows
            .into_iter()
            .map(|row| {
                let related_products = row
                    .related_product_ids
                    .iter()
                    .filter_map(|id| by_id.get(id.as_str()).map(|p| (*p).clone()))
                    .collect();
                let mut review = Review::from(row);
                review.related_products = related_products;
                review
            })
            .collect())
    }

    async fn local_review(
        &self,
        id: String,
        draft: &ReviewDraft,
        existing: Option<Review>,
    ) -> Result<Review, DataError> {
        let related_products = self.related_products(&draft.related_product_ids).await?;
        let (thumbnail, created_at) = match existing {
            Some(e) => (e.thumbnail, e.created_at),
            None => (draft.thumbnail.clone(), Some(Utc::now())),
        };

        Ok(Review {
            id,
            creator: draft.creator.clone(),
            thumbnail,
            video_url: draft.video_url.clone(),
            overlay_text: draft.overlay_text.clone(),
            review_text: draft.review_text.clone(),
            related_products,
            created_at,
        })
    }
}
