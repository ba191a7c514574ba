use crate::data::models::product::null_as_default;
use crate::data::models::schema::*;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub name: String,
    pub handle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Denormalized pointer from a review to a product it features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedProduct {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub creator: Creator,
    #[serde(default, deserialize_with = "null_as_default")]
    pub thumbnail: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub video_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overlay_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub review_text: String,
    /// Display order is the order the admin picked them in.
    #[serde(default, deserialize_with = "null_as_default")]
    pub related_products: Vec<RelatedProduct>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Review {
    pub fn related_product_ids(&self) -> Vec<String> {
        self.related_products.iter().map(|p| p.id.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub creator: Creator,
    pub video_url: String,
    pub thumbnail: String,
    pub overlay_text: String,
    pub review_text: String,
    pub related_product_ids: Vec<String>,
}

#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = reviews)]
#[diesel(primary_key(id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReviewRow {
    pub id: String,
    pub creator: serde_json::Value,
    pub video_url: String,
    pub thumbnail: String,
    pub overlay_text: String,
    pub review_text: String,
    pub related_product_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = reviews)]
pub struct NewReviewRow {
    pub id: String,
    pub creator: serde_json::Value,
    pub video_url: String,
    pub thumbnail: String,
    pub overlay_text: String,
    pub review_text: String,
    pub related_product_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Edits leave the thumbnail untouched.
#[derive(AsChangeset, PartialEq, Debug)]
#[diesel(table_name = reviews)]
pub struct ReviewChanges {
    pub creator: serde_json::Value,
    pub video_url: String,
    pub overlay_text: String,
    pub review_text: String,
    pub related_product_ids: Vec<String>,
}
