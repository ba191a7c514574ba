use crate::browse::filter::Facets;
use crate::data::content::SiteContent;
use crate::data::models::brand::Brand;
use crate::data::models::category::Category;
use crate::data::models::product::Product;
use crate::data::models::review::Review;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// No extra payload.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Empty {}

/// The `{success, message}` envelope every action answers with. Extra
/// fields of `T` are flattened next to them.
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ActionResponse<T = Empty> {
    pub success: bool,
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

impl ActionResponse {
    pub fn ok() -> Self {
        ActionResponse {
            success: true,
            message: None,
            data: Empty {},
        }
    }

    pub fn success(message: &str) -> Self {
        ActionResponse {
            success: true,
            message: Some(message.to_string()),
            data: Empty {},
        }
    }

    pub fn failure(message: &str) -> Self {
        ActionResponse {
            success: false,
            message: Some(message.to_string()),
            data: Empty {},
        }
    }
}

impl<T> ActionResponse<T> {
    pub fn with_data(message: Option<&str>, data: T) -> Self {
        ActionResponse {
            success: true,
            message: message.map(str::to_string),
            data,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignedUploadResponse {
    pub signed_url: String,
    pub path: String,
    pub public_url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SavedProduct {
    pub product: Product,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SavedReview {
    pub review: Review,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SavedCategory {
    pub category: Category,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SavedBrand {
    pub brand: Brand,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    pub content: SiteContent,
    pub reviews: Vec<Review>,
    pub featured: Vec<Product>,
    pub new_arrivals: Vec<Product>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub facets: Facets,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPageResponse {
    pub slug: String,
    pub category_name: String,
    pub products: Vec<Product>,
    pub facets: Facets,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProductDetailResponse {
    pub product: Product,
    pub related: Vec<Product>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReviewDetailResponse {
    pub review: Review,
    pub others: Vec<Review>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<Product>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MediaImage {
    pub name: String,
    /// In bytes.
    pub size: u64,
    pub url: String,
}
