use crate::data::models::schema::*;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = brands)]
#[diesel(primary_key(id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BrandRow {
    pub id: String,
    pub name: String,
    pub logo: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = brands)]
pub struct NewBrandRow {
    pub id: String,
    pub name: String,
    pub logo: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(AsChangeset, PartialEq, Debug)]
#[diesel(table_name = brands)]
#[diesel(treat_none_as_null = true)]
pub struct BrandChanges {
    pub name: String,
    pub logo: Option<String>,
}
