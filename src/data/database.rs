use crate::data::errors::DataError;
use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::deadpool::{Object, Pool};

/// Pooled connections to the managed Postgres backend.
#[derive(Clone)]
pub struct Database {
    pool: Pool<AsyncPgConnection>,
}

impl Database {
    pub fn connect(database_url: &str) -> Result<Self, DataError> {
        let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
        let pool = Pool::builder(config)
            .build()
            .map_err(|e| DataError::Pool(e.to_string()))?;

        tracing::info!("DB connection pool created");

        Ok(Database { pool })
    }

    pub async fn get_connection(&self) -> Result<Object<AsyncPgConnection>, DataError> {
        self.pool
            .get()
            .await
            .map_err(|e| DataError::Pool(e.to_string()))
    }
}
