use crate::api::form::{FormPayload, UploadedFile};
use crate::browse::filter::{Facets, PriceRange, ProductFilter, SortKey};
use crate::data::models::product::{ProductStatus, StockStatus};
use crate::services::errors::ServiceError;
use crate::session::cart::CartItem;
use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Parses `key: value` lines. Lines without exactly one colon, or with a
/// blank key or value, are skipped.
pub fn parse_specifications(text: &str) -> BTreeMap<String, String> {
    text.lines()
        .filter_map(|line| {
            let mut parts = line.split(':');
            let (key, value) = (parts.next()?, parts.next()?);
            if parts.next().is_some() {
                return None;
            }

            let (key, value) = (key.trim(), value.trim());
            (!key.is_empty() && !value.is_empty()).then(|| (key.to_string(), value.to_string()))
        })
        .collect()
}

/// Splits a comma list, trimming entries and dropping blanks.
pub fn comma_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn flag(payload: &FormPayload, name: &str) -> bool {
    payload.get(name).map(str::trim) == Some("true")
}

fn text(payload: &FormPayload, name: &str) -> String {
    payload.get(name).unwrap_or_default().to_string()
}

fn parse_price(raw: Option<&str>) -> Result<BigDecimal, ServiceError> {
    let raw = raw.ok_or_else(|| ServiceError::validation("Price is required."))?;

    BigDecimal::from_str(raw)
        .ok()
        .filter(|price| *price >= BigDecimal::zero())
        .ok_or_else(|| ServiceError::validation("Price must be a non-negative number."))
}

/// Admin product form, shared by add and update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub price: BigDecimal,
    pub description: String,
    pub category: Option<String>,
    pub category_id: Option<String>,
    pub specifications: BTreeMap<String, String>,
    pub care: String,
    pub stock_status: StockStatus,
    pub status: ProductStatus,
    pub redirect_link: Option<String>,
    pub color: String,
    pub material: String,
    pub is_featured: bool,
    pub is_new: bool,
    pub popularity: i32,
    pub colors: Vec<String>,
    pub materials: Vec<String>,
    /// Update only: URLs to keep, in order.
    pub existing_images: Vec<String>,
    pub main_image: Option<UploadedFile>,
    pub gallery_images: Vec<UploadedFile>,
    /// Older field names: `images` on add, `newImages` on update.
    pub legacy_images: Vec<UploadedFile>,
    pub new_images: Vec<UploadedFile>,
}

impl ProductForm {
    pub fn from_payload(payload: &FormPayload) -> Result<Self, ServiceError> {
        let name = payload
            .get_trimmed("name")
            .ok_or_else(|| ServiceError::validation("Product name is required."))?
            .to_string();

        let price = parse_price(payload.get_trimmed("price"))?;

        let popularity = match payload.get_trimmed("popularity") {
            None => 0,
            Some(raw) => raw
                .parse()
                .map_err(|_| ServiceError::validation("Popularity must be a whole number."))?,
        };

        let stock_status = match payload.get_trimmed("stockStatus") {
            None => StockStatus::default(),
            Some(raw) => raw.parse().map_err(ServiceError::Validation)?,
        };

        let status = match payload.get_trimmed("status") {
            None => ProductStatus::default(),
            Some(raw) => raw.parse().map_err(ServiceError::Validation)?,
        };

        let owned = |files: Vec<&UploadedFile>| files.into_iter().cloned().collect::<Vec<_>>();

        Ok(ProductForm {
            name,
            price,
            description: text(payload, "description"),
            category: payload.get_trimmed("category").map(str::to_string),
            category_id: payload.get_trimmed("category_id").map(str::to_string),
            specifications: parse_specifications(payload.get("specifications").unwrap_or_default()),
            care: text(payload, "care"),
            stock_status,
            status,
            redirect_link: payload.get_trimmed("redirectLink").map(str::to_string),
            color: text(payload, "color"),
            material: text(payload, "material"),
            is_featured: flag(payload, "isFeatured"),
            is_new: flag(payload, "isNew"),
            popularity,
            colors: comma_list(payload.get("colors").unwrap_or_default()),
            materials: comma_list(payload.get("materials").unwrap_or_default()),
            existing_images: comma_list(payload.get("existingImages").unwrap_or_default()),
            main_image: payload.file_named("mainImage").cloned(),
            gallery_images: owned(payload.files_named("galleryImages")),
            legacy_images: owned(payload.files_named("images")),
            new_images: owned(payload.files_named("newImages")),
        })
    }
}

/// Related product ids arrive under either spelling.
fn related_ids(payload: &FormPayload) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();

    for id in payload
        .get_all("relatedProductIds")
        .into_iter()
        .chain(payload.get_all("related_product_ids"))
        .flat_map(comma_list)
    {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    ids
}

/// Admin review form with the video uploaded through the action.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewForm {
    pub creator_name: String,
    pub creator_handle: String,
    pub thumbnail: String,
    pub overlay_text: String,
    pub review_text: String,
    pub related_product_ids: Vec<String>,
    /// `video` on create, `videoFile` on update.
    pub video: Option<UploadedFile>,
    pub existing_video_url: Option<String>,
}

impl ReviewForm {
    pub fn from_payload(payload: &FormPayload) -> Result<Self, ServiceError> {
        let creator_name = payload
            .get_trimmed("creatorName")
            .ok_or_else(|| ServiceError::validation("Creator name is required."))?
            .to_string();

        Ok(ReviewForm {
            creator_name,
            creator_handle: text(payload, "creatorHandle").trim().to_string(),
            thumbnail: text(payload, "thumbnail"),
            overlay_text: text(payload, "overlayText"),
            review_text: text(payload, "reviewText"),
            related_product_ids: related_ids(payload),
            video: payload
                .file_named("video")
                .or_else(|| payload.file_named("videoFile"))
                .cloned(),
            existing_video_url: payload.get_trimmed("existingVideoUrl").map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUploadRequest {
    #[serde(default)]
    pub file_name: String,
}

/// Registers a review whose video the client already uploaded directly.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecordRequest {
    #[serde(default)]
    pub creator_name: String,
    #[serde(default)]
    pub creator_handle: String,
    #[serde(default)]
    pub overlay_text: Option<String>,
    #[serde(default)]
    pub review_text: Option<String>,
    #[serde(default, alias = "related_product_ids")]
    pub related_product_ids: Vec<String>,
    #[serde(default)]
    pub video_path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrandForm {
    pub id: Option<String>,
    pub name: String,
    pub logo: Option<UploadedFile>,
    pub current_logo: Option<String>,
}

impl BrandForm {
    pub fn from_payload(payload: &FormPayload) -> Result<Self, ServiceError> {
        let name = payload
            .get_trimmed("name")
            .ok_or_else(|| ServiceError::validation("Brand name is required."))?
            .to_string();

        Ok(BrandForm {
            id: payload.get_trimmed("id").map(str::to_string),
            name,
            logo: payload.file_named("logo").cloned(),
            current_logo: payload.get_trimmed("currentLogo").map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckoutDetails {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub phone: String,
    /// `cod` or `card`.
    pub payment_method: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    #[serde(flatten)]
    pub details: CheckoutDetails,
    #[serde(default)]
    pub cart_items: Vec<CartItem>,
    /// Items plus shipping.
    #[serde(with = "bigdecimal::serde::json_num")]
    pub cart_total: BigDecimal,
}

/// Query string of product listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductQuery {
    pub sort: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub colors: Option<String>,
    pub materials: Option<String>,
}

impl ProductQuery {
    pub fn to_filter(&self, facets: &Facets) -> Result<ProductFilter, ServiceError> {
        let sort = match self.sort.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => SortKey::default(),
            Some(raw) => raw.parse().map_err(ServiceError::Validation)?,
        };

        let bound = |raw: &Option<String>| -> Result<Option<BigDecimal>, ServiceError> {
            raw.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    BigDecimal::from_str(s)
                        .map_err(|_| ServiceError::validation(format!("Invalid price: {}", s)))
                })
                .transpose()
        };

        let (min, max) = (bound(&self.min_price)?, bound(&self.max_price)?);
        let price_range = if min.is_none() && max.is_none() {
            None
        } else {
            let defaults = facets.default_price_range();
            Some(PriceRange {
                min: min.unwrap_or(defaults.min),
                max: max.unwrap_or(defaults.max),
            })
        };

        Ok(ProductFilter {
            price_range,
            colors: comma_list(self.colors.as_deref().unwrap_or_default()),
            materials: comma_list(self.materials.as_deref().unwrap_or_default()),
            sort,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub q: String,
}
