use crate::data::errors::DataError;
use crate::data::models::brand::Brand;
use crate::data::models::category::Category;
use crate::data::models::product::Product;
use crate::data::models::review::Review;
use crate::data::repos::traits::repository::Repository;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// A JSON fixture entry addressable by id.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

impl Record for Product {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Brand {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Review {
    fn id(&self) -> &str {
        &self.id
    }
}

/// One JSON array file treated as a table. Writers are serialized and
/// replace the file atomically.
pub struct JsonTable<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> JsonTable<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonTable {
            path: path.into(),
            write_lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Vec<T>, DataError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, records: &[T]) -> Result<(), DataError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl<T: Record> Repository for JsonTable<T> {
    type Id = String;
    type Item = T;
    type NewItem = T;
    type UpdateForm = T;

    async fn get_all(&self) -> Result<Vec<Self::Item>, DataError> {
        self.read().await
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, DataError> {
        Ok(self.read().await?.into_iter().find(|r| r.id() == id))
    }

    async fn add(&self, item: Self::NewItem) -> Result<(), DataError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read().await?;
        records.push(item);
        self.write(&records).await
    }

    async fn update(&self, id: Self::Id, item: Self::UpdateForm) -> Result<(), DataError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read().await?;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| DataError::NotFound(id.clone()))?;
        *slot = item;
        self.write(&records).await
    }

    async fn delete(&self, id: Self::Id) -> Result<(), DataError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read().await?;
        let before = records.len();
        records.retain(|r| r.id() != id);

        if records.len() == before {
            return Err(DataError::NotFound(id));
        }
        self.write(&records).await
    }
}

/// Local stand-in for the managed backend's tables.
pub struct FixtureStore {
    pub products: JsonTable<Product>,
    pub categories: JsonTable<Category>,
    pub brands: JsonTable<Brand>,
    pub reviews: JsonTable<Review>,
}

impl FixtureStore {
    pub fn open(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();

        tracing::info!("Using local fixtures in {}", dir.display());

        FixtureStore {
            products: JsonTable::new(dir.join("products.json")),
            categories: JsonTable::new(dir.join("categories.json")),
            brands: JsonTable::new(dir.join("brands.json")),
            reviews: JsonTable::new(dir.join("reviews.json")),
        }
    }
}
