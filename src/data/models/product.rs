use crate::data::models::category::Category;
use crate::data::models::schema::*;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Availability shown to shoppers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    #[default]
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Made to Order")]
    MadeToOrder,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::MadeToOrder => "Made to Order",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }
}

impl FromStr for StockStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "in stock" => Ok(StockStatus::InStock),
            "made to order" => Ok(StockStatus::MadeToOrder),
            "out of stock" => Ok(StockStatus::OutOfStock),
            other => Err(format!("Unknown stock status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    #[default]
    Active,
    Archived,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "Active",
            ProductStatus::Archived => "Archived",
        }
    }
}

impl FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(ProductStatus::Active),
            "archived" => Ok(ProductStatus::Archived),
            other => Err(format!("Unknown product status: {}", other)),
        }
    }
}

/// Selectable variants offered on the product page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOptions {
    #[serde(default, deserialize_with = "null_as_default")]
    pub colors: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub materials: Vec<String>,
}

/// A catalog product as the storefront sees it: the category is
/// denormalized to its display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(with = "bigdecimal::serde::json_num")]
    pub price: BigDecimal,
    /// Primary image first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub specifications: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub care: String,
    #[serde(default)]
    pub stock_status: StockStatus,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub material: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: ProductOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_link: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub popularity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Validated product fields with the category already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub category: Option<Category>,
    pub price: BigDecimal,
    pub images: Vec<String>,
    pub description: String,
    pub specifications: BTreeMap<String, String>,
    pub care: String,
    pub stock_status: StockStatus,
    pub status: ProductStatus,
    pub color: String,
    pub material: String,
    pub options: ProductOptions,
    pub redirect_link: Option<String>,
    pub is_featured: bool,
    pub is_new: bool,
    pub popularity: i32,
}

impl ProductDraft {
    pub fn into_product(self, id: String, created_at: Option<DateTime<Utc>>) -> Product {
        let (category_id, category) = match self.category {
            Some(c) => (Some(c.id), c.name),
            None => (None, String::new()),
        };

        Product {
            id,
            name: self.name,
            category_id,
            category,
            price: self.price,
            images: self.images,
            description: self.description,
            specifications: self.specifications,
            care: self.care,
            stock_status: self.stock_status,
            status: self.status,
            color: self.color,
            material: self.material,
            options: self.options,
            redirect_link: self.redirect_link,
            is_featured: self.is_featured,
            is_new: self.is_new,
            popularity: self.popularity,
            created_at,
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = products)]
#[diesel(primary_key(id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub category_id: Option<String>,
    pub price: BigDecimal,
    pub images: Vec<String>,
    pub description: String,
    pub specifications: serde_json::Value,
    pub care: String,
    pub stock_status: String,
    pub status: String,
    pub color: String,
    pub material: String,
    pub options: serde_json::Value,
    pub redirect_link: Option<String>,
    pub is_featured: bool,
    pub is_new: bool,
    pub popularity: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = products)]
pub struct NewProductRow {
    pub id: String,
    pub name: String,
    pub category_id: Option<String>,
    pub price: BigDecimal,
    pub images: Vec<String>,
    pub description: String,
    pub specifications: serde_json::Value,
    pub care: String,
    pub stock_status: String,
    pub status: String,
    pub color: String,
    pub material: String,
    pub options: serde_json::Value,
    pub redirect_link: Option<String>,
    pub is_featured: bool,
    pub is_new: bool,
    pub popularity: i32,
    pub created_at: DateTime<Utc>,
}

/// Full replacement of the editable columns; an unresolved category clears
/// the reference.
#[derive(AsChangeset, PartialEq, Debug)]
#[diesel(table_name = products)]
#[diesel(treat_none_as_null = true)]
pub struct ProductChanges {
    pub name: String,
    pub category_id: Option<String>,
    pub price: BigDecimal,
    pub images: Vec<String>,
    pub description: String,
    pub specifications: serde_json::Value,
    pub care: String,
    pub stock_status: String,
    pub status: String,
    pub color: String,
    pub material: String,
    pub options: serde_json::Value,
    pub redirect_link: Option<String>,
    pub is_featured: bool,
    pub is_new: bool,
    pub popularity: i32,
}

/// Treats an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
