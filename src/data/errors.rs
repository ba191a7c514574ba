use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Database error: {0}")]
    Diesel(#[from] diesel::result::Error),
    #[error("Connection pool error: {0}")]
    Pool(String),
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Record not found: {0}")]
    NotFound(String),
}

impl DataError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DataError::NotFound(_) | DataError::Diesel(diesel::result::Error::NotFound)
        )
    }
}
