use crate::data::errors::DataError;
use async_trait::async_trait;

/// Row-level CRUD over one table, regardless of where the table lives.
#[async_trait]
pub trait Repository {
    type Id: Send + Sync;
    type Item: Send;
    type NewItem: Send;
    type UpdateForm: Send;

    async fn get_all(&self) -> Result<Vec<Self::Item>, DataError>;

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, DataError>;

    async fn add(&self, item: Self::NewItem) -> Result<(), DataError>;

    /// Fails with [`DataError::NotFound`] when no row has `id`.
    async fn update(&self, id: Self::Id, item: Self::UpdateForm) -> Result<(), DataError>;

    async fn delete(&self, id: Self::Id) -> Result<(), DataError>;
}
