use crate::data::database::Database;
use crate::data::errors::DataError;
use crate::data::models::review::{NewReviewRow, ReviewChanges, ReviewRow};
use crate::data::repos::traits::repository::Repository;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

/// Reviews keep only the ids of their related products; names are resolved
/// by the caller.
pub struct ReviewRepo {
    db: Database,
}

impl ReviewRepo {
    pub fn new(db: Database) -> Self {
        ReviewRepo { db }
    }
}

#[async_trait]
impl Repository for ReviewRepo {
    type Id = String;
    type Item = ReviewRow;
    type NewItem = NewReviewRow;
    type UpdateForm = ReviewChanges;

    async fn get_all(&self) -> Result<Vec<Self::Item>, DataError> {
        use crate::data::models::schema::reviews::dsl::{created_at, reviews};

        let mut conn = self.db.get_connection().await?;

        Ok(reviews
            .select(ReviewRow::as_select())
            .order(created_at.desc())
            .load::<ReviewRow>(&mut conn)
            .await?)
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, DataError> {
        use crate::data::models::schema::reviews::dsl::{id as review_id, reviews};

        let mut conn = self.db.get_connection().await?;

        match reviews
            .filter(review_id.eq(id))
            .select(ReviewRow::as_select())
            .first::<ReviewRow>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn add(&self, item: Self::NewItem) -> Result<(), DataError> {
        use crate::data::models::schema::reviews::dsl::reviews;

        let mut conn = self.db.get_connection().await?;

        conn.transaction::<_, result::Error, _>(|connection| {
            async move {
                diesel::insert_into(reviews)
                    .values(&item)
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await?;

        Ok(())
    }

    async fn update(&self, id: Self::Id, item: Self::UpdateForm) -> Result<(), DataError> {
        use crate::data::models::schema::reviews::dsl::{id as review_id, reviews};

        let mut conn = self.db.get_connection().await?;

        let affected = diesel::update(reviews.filter(review_id.eq(&id)))
            .set(&item)
            .execute(&mut conn)
            .await?;

        if affected == 0 {
            return Err(DataError::NotFound(format!("review {}", id)));
        }
        Ok(())
    }

    async fn delete(&self, id: Self::Id) -> Result<(), DataError> {
        use crate::data::models::schema::reviews::dsl::{id as review_id, reviews};

        let mut conn = self.db.get_connection().await?;

        let affected = diesel::delete(reviews.filter(review_id.eq(&id)))
            .execute(&mut conn)
            .await?;

        if affected == 0 {
            return Err(DataError::NotFound(format!("review {}", id)));
        }
        Ok(())
    }
}
