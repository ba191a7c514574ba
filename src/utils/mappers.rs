use crate::data::models::brand::{Brand, BrandChanges, BrandRow, NewBrandRow};
use crate::data::models::category::{Category, CategoryChanges, CategoryRow, NewCategoryRow};
use crate::data::models::product::{
    NewProductRow, Product, ProductChanges, ProductDraft, ProductOptions, ProductRow,
};
use crate::data::models::review::{
    Creator, NewReviewRow, Review, ReviewChanges, ReviewDraft, ReviewRow,
};
use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

fn specifications_to_json(specs: &BTreeMap<String, String>) -> Value {
    Value::Object(
        specs
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect::<Map<String, Value>>(),
    )
}

fn options_to_json(options: &ProductOptions) -> Value {
    serde_json::json!({
        "colors": options.colors,
        "materials": options.materials,
    })
}

fn creator_to_json(creator: &Creator) -> Value {
    let mut map = Map::new();
    map.insert("name".into(), Value::String(creator.name.clone()));
    map.insert("handle".into(), Value::String(creator.handle.clone()));
    if let Some(avatar) = &creator.avatar {
        map.insert("avatar".into(), Value::String(avatar.clone()));
    }
    Value::Object(map)
}

/// Row plus the joined category name.
impl From<(ProductRow, Option<String>)> for Product {
    fn from((row, category_name): (ProductRow, Option<String>)) -> Self {
        Product {
            id: row.id,
            name: row.name,
            category_id: row.category_id,
            category: category_name.unwrap_or_default(),
            price: row.price,
            images: row.images,
            description: row.description,
            specifications: serde_json::from_value(row.specifications).unwrap_or_default(),
            care: row.care,
            stock_status: row.stock_status.parse().unwrap_or_default(),
            status: row.status.parse().unwrap_or_default(),
            color: row.color,
            material: row.material,
            options: serde_json::from_value(row.options).unwrap_or_default(),
            redirect_link: row.redirect_link,
            is_featured: row.is_featured,
            is_new: row.is_new,
            popularity: row.popularity,
            created_at: Some(row.created_at),
        }
    }
}

impl From<&Product> for NewProductRow {
    fn from(product: &Product) -> Self {
        NewProductRow {
            id: product.id.clone(),
            name: product.name.clone(),
            category_id: product.category_id.clone(),
            price: product.price.clone(),
            images: product.images.clone(),
            description: product.description.clone(),
            specifications: specifications_to_json(&product.specifications),
            care: product.care.clone(),
            stock_status: product.stock_status.as_str().to_string(),
            status: product.status.as_str().to_string(),
            color: product.color.clone(),
            material: product.material.clone(),
            options: options_to_json(&product.options),
            redirect_link: product.redirect_link.clone(),
            is_featured: product.is_featured,
            is_new: product.is_new,
            popularity: product.popularity,
            created_at: product.created_at.unwrap_or_else(Utc::now),
        }
    }
}

impl From<&ProductDraft> for ProductChanges {
    fn from(draft: &ProductDraft) -> Self {
        ProductChanges {
            name: draft.name.clone(),
            category_id: draft.category.as_ref().map(|c| c.id.clone()),
            price: draft.price.clone(),
            images: draft.images.clone(),
            description: draft.description.clone(),
            specifications: specifications_to_json(&draft.specifications),
            care: draft.care.clone(),
            stock_status: draft.stock_status.as_str().to_string(),
            status: draft.status.as_str().to_string(),
            color: draft.color.clone(),
            material: draft.material.clone(),
            options: options_to_json(&draft.options),
            redirect_link: draft.redirect_link.clone(),
            is_featured: draft.is_featured,
            is_new: draft.is_new,
            popularity: draft.popularity,
        }
    }
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

impl From<&Category> for NewCategoryRow {
    fn from(category: &Category) -> Self {
        NewCategoryRow {
            id: category.id.clone(),
            name: category.name.clone(),
            description: category.description.clone(),
            created_at: Utc::now(),
        }
    }
}

impl From<&Category> for CategoryChanges {
    fn from(category: &Category) -> Self {
        CategoryChanges {
            name: category.name.clone(),
            description: category.description.clone(),
        }
    }
}

impl From<BrandRow> for Brand {
    fn from(row: BrandRow) -> Self {
        Brand {
            id: row.id,
            name: row.name,
            logo: row.logo,
        }
    }
}

impl From<&Brand> for NewBrandRow {
    fn from(brand: &Brand) -> Self {
        NewBrandRow {
            id: brand.id.clone(),
            name: brand.name.clone(),
            logo: brand.logo.clone(),
            created_at: Utc::now(),
        }
    }
}

impl From<&Brand> for BrandChanges {
    fn from(brand: &Brand) -> Self {
        BrandChanges {
            name: brand.name.clone(),
            logo: brand.logo.clone(),
        }
    }
}

/// Related products are left empty; the catalog resolves them from
/// `related_product_ids`.
impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            id: row.id,
            creator: serde_json::from_value(row.creator).unwrap_or_default(),
            thumbnail: row.thumbnail,
            video_url: row.video_url,
            overlay_text: row.overlay_text,
            review_text: row.review_text,
            related_products: Vec::new(),
            created_at: Some(row.created_at),
        }
    }
}

impl From<(&str, &ReviewDraft)> for NewReviewRow {
    fn from((id, draft): (&str, &ReviewDraft)) -> Self {
        NewReviewRow {
            id: id.to_string(),
            creator: creator_to_json(&draft.creator),
            video_url: draft.video_url.clone(),
            thumbnail: draft.thumbnail.clone(),
            overlay_text: draft.overlay_text.clone(),
            review_text: draft.review_text.clone(),
            related_product_ids: draft.related_product_ids.clone(),
            created_at: Utc::now(),
        }
    }
}

impl From<&ReviewDraft> for ReviewChanges {
    fn from(draft: &ReviewDraft) -> Self {
        ReviewChanges {
            creator: creator_to_json(&draft.creator),
            video_url: draft.video_url.clone(),
            overlay_text: draft.overlay_text.clone(),
            review_text: draft.review_text.clone(),
            related_product_ids: draft.related_product_ids.clone(),
        }
    }
}
