use crate::data::database::Database;
use crate::data::errors::DataError;
use crate::data::models::category::{Category, CategoryChanges, CategoryRow, NewCategoryRow};
use crate::data::repos::traits::repository::Repository;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::RunQueryDsl;

pub struct CategoryRepo {
    db: Database,
}

impl CategoryRepo {
    pub fn new(db: Database) -> Self {
        CategoryRepo { db }
    }
}

#[async_trait]
impl Repository for CategoryRepo {
    type Id = String;
    type Item = Category;
    type NewItem = NewCategoryRow;
    type UpdateForm = CategoryChanges;

    async fn get_all(&self) -> Result<Vec<Self::Item>, DataError> {
        use crate::data::models::schema::categories::dsl::{categories, name};

        let mut conn = self.db.get_connection().await?;

        let rows = categories
            .select(CategoryRow::as_select())
            .order(name.asc())
            .load::<CategoryRow>(&mut conn)
            .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, DataError> {
        use crate::data::models::schema::categories::dsl::{categories, id as category_id};

        let mut conn = self.db.get_connection().await?;

        match categories
            .filter(category_id.eq(id))
            .select(CategoryRow::as_select())
            .first::<CategoryRow>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value.into())),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn add(&self, item: Self::NewItem) -> Result<(), DataError> {
        use crate::data::models::schema::categories::dsl::categories;

        let mut conn = self.db.get_connection().await?;

        diesel::insert_into(categories)
            .values(&item)
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    async fn update(&self, id: Self::Id, item: Self::UpdateForm) -> Result<(), DataError> {
        use crate::data::models::schema::categories::dsl::{categories, id as category_id};

        let mut conn = self.db.get_connection().await?;

        let affected = diesel::update(categories.filter(category_id.eq(&id)))
            .set(&item)
            .execute(&mut conn)
            .await?;

        if affected == 0 {
            return Err(DataError::NotFound(format!("category {}", id)));
        }
        Ok(())
    }

    async fn delete(&self, id: Self::Id) -> Result<(), DataError> {
        use crate::data::models::schema::categories::dsl::{categories, id as category_id};

        let mut conn = self.db.get_connection().await?;

        let affected = diesel::delete(categories.filter(category_id.eq(&id)))
            .execute(&mut conn)
            .await?;

        if affected == 0 {
            return Err(DataError::NotFound(format!("category {}", id)));
        }
        Ok(())
    }
}
