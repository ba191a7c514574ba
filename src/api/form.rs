use crate::services::errors::ServiceError;
use axum::extract::{FromRequest, Multipart, Request};

/// A file part of a multipart form.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: &str, bytes: impl Into<Vec<u8>>) -> Self {
        UploadedFile {
            file_name: file_name.to_string(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    /// Browsers submit untouched file inputs as empty parts.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Every part of a multipart body, in order. Repeated names are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormPayload {
    fields: Vec<(String, String)>,
    files: Vec<(String, UploadedFile)>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.fields.push((name.to_string(), value.to_string()));
        self
    }

    pub fn file(mut self, name: &str, file: UploadedFile) -> Self {
        self.files.push((name.to_string(), file));
        self
    }

    /// First value of a text field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// First value, trimmed, with blank treated as absent.
    pub fn get_trimmed(&self, name: &str) -> Option<&str> {
        self.get(name).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// First non-empty file under `name`.
    pub fn file_named(&self, name: &str) -> Option<&UploadedFile> {
        self.files_named(name).into_iter().next()
    }

    /// Non-empty files under `name`, in submission order.
    pub fn files_named(&self, name: &str) -> Vec<&UploadedFile> {
        self.files
            .iter()
            .filter(|(n, f)| n == name && !f.is_empty())
            .map(|(_, f)| f)
            .collect()
    }
}

impl<S> FromRequest<S> for FormPayload
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state).await.map_err(|e| {
            tracing::warn!("Rejected form body: {}", e);
            ServiceError::validation(e.body_text())
        })?;

        let mut payload = FormPayload::new();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            tracing::warn!("Malformed multipart field: {}", e);
            ServiceError::validation(e.body_text())
        })? {
            let name = field.name().unwrap_or_default().to_string();

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ServiceError::validation(e.body_text()))?;
                    payload.files.push((
                        name,
                        UploadedFile {
                            file_name,
                            content_type,
                            bytes: bytes.to_vec(),
                        },
                    ));
                }
                None => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| ServiceError::validation(e.body_text()))?;
                    payload.fields.push((name, value));
                }
            }
        }

        Ok(payload)
    }
}
