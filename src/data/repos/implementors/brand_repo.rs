use crate::data::database::Database;
use crate::data::errors::DataError;
use crate::data::models::brand::{Brand, BrandChanges, BrandRow, NewBrandRow};
use crate::data::repos::traits::repository::Repository;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::RunQueryDsl;

pub struct BrandRepo {
    db: Database,
}

impl BrandRepo {
    pub fn new(db: Database) -> Self {
        BrandRepo { db }
    }
}

#[async_trait]
impl Repository for BrandRepo {
    type Id = String;
    type Item = Brand;
    type NewItem = NewBrandRow;
    type UpdateForm = BrandChanges;

    async fn get_all(&self) -> Result<Vec<Self::Item>, DataError> {
        use crate::data::models::schema::brands::dsl::{brands, name};

        let mut conn = self.db.get_connection().await?;

        let rows = brands
            .select(BrandRow::as_select())
            .order(name.asc())
            .load::<BrandRow>(&mut conn)
            .await?;

        Ok(rows.into_iter().map(Brand::from).collect())
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, DataError> {
        use crate::data::models::schema::brands::dsl::{brands, id as brand_id};

        let mut conn = self.db.get_connection().await?;

        match brands
            .filter(brand_id.eq(id))
            .select(BrandRow::as_select())
            .first::<BrandRow>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value.into())),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn add(&self, item: Self::NewItem) -> Result<(), DataError> {
        use crate::data::models::schema::brands::dsl::brands;

        let mut conn = self.db.get_connection().await?;

        diesel::insert_into(brands)
            .values(&item)
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    async fn update(&self, id: Self::Id, item: Self::UpdateForm) -> Result<(), DataError> {
        use crate::data::models::schema::brands::dsl::{brands, id as brand_id};

        let mut conn = self.db.get_connection().await?;

        let affected = diesel::update(brands.filter(brand_id.eq(&id)))
            .set(&item)
            .execute(&mut conn)
            .await?;

        if affected == 0 {
            return Err(DataError::NotFound(format!("brand {}", id)));
        }
        Ok(())
    }

    async fn delete(&self, id: Self::Id) -> Result<(), DataError> {
        use crate::data::models::schema::brands::dsl::{brands, id as brand_id};

        let mut conn = self.db.get_connection().await?;

        let affected = diesel::delete(brands.filter(brand_id.eq(&id)))
            .execute(&mut conn)
            .await?;

        if affected == 0 {
            return Err(DataError::NotFound(format!("brand {}", id)));
        }
        Ok(())
    }
}
