use crate::data::database::Database;
use crate::data::errors::DataError;
use crate::data::models::product::{NewProductRow, Product, ProductChanges, ProductRow};
use crate::data::repos::traits::repository::Repository;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

pub struct ProductRepo {
    db: Database,
}

impl ProductRepo {
    pub fn new(db: Database) -> Self {
        ProductRepo { db }
    }

    /// Retrieves the products whose id is in `ids`, newest first.
    pub async fn get_by_ids(&self, ids: &[String]) -> Result<Vec<Product>, DataError> {
        use crate::data::models::schema::{categories, products};

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.db.get_connection().await?;

        let rows = products::table
            .left_join(categories::table)
            .filter(products::id.eq_any(ids.to_vec()))
            .select((ProductRow::as_select(), categories::name.nullable()))
            .order(products::created_at.desc())
            .load::<(ProductRow, Option<String>)>(&mut conn)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}

#[async_trait]
impl Repository for ProductRepo {
    type Id = String;
    type Item = Product;
    type NewItem = NewProductRow;
    type UpdateForm = ProductChanges;

    async fn get_all(&self) -> Result<Vec<Self::Item>, DataError> {
        use crate::data::models::schema::{categories, products};

        let mut conn = self.db.get_connection().await?;

        let rows = products::table
            .left_join(categories::table)
            .select((ProductRow::as_select(), categories::name.nullable()))
            .order(products::created_at.desc())
            .load::<(ProductRow, Option<String>)>(&mut conn)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, DataError> {
        use crate::data::models::schema::{categories, products};

        let mut conn = self.db.get_connection().await?;

        match products::table
            .left_join(categories::table)
            .filter(products::id.eq(id))
            .select((ProductRow::as_select(), categories::name.nullable()))
            .first::<(ProductRow, Option<String>)>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(Product::from(value))),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn add(&self, item: Self::NewItem) -> Result<(), DataError> {
        use crate::data::models::schema::products::dsl::products;

        let mut conn = self.db.get_connection().await?;

        conn.transaction::<_, result::Error, _>(|connection| {
            async move {
                diesel::insert_into(products)
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
        use crate::data::models::schema::products::dsl::{id as product_id, products};

        let mut conn = self.db.get_connection().await?;
        let target = id.clone();

        let affected = conn
            .transaction::<_, result::Error, _>(|connection| {
                async move {
                    diesel::update(products.filter(product_id.eq(target)))
                        .set(&item)
                        .execute(connection)
                        .await
                }
                .scope_boxed()
            })
            .await?;

        if affected == 0 {
            return Err(DataError::NotFound(format!("product {}", id)));
        }
        Ok(())
    }

    async fn delete(&self, id: Self::Id) -> Result<(), DataError> {
        use crate::data::models::schema::products::dsl::{id as product_id, products};

        let mut conn = self.db.get_connection().await?;
        let target = id.clone();

        let affected = conn
            .transaction::<_, result::Error, _>(|connection| {
                async move {
                    diesel::delete(products.filter(product_id.eq(target)))
                        .execute(connection)
                        .await
                }
                .scope_boxed()
            })
            .await?;

        if affected == 0 {
            return Err(DataError::NotFound(format!("product {}", id)));
        }
        Ok(())
    }
}
