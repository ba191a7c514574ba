use crate::storage::{Bucket, ObjectStorage, StorageError};
use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::Deserialize;

/// Client for the managed backend's storage REST API.
pub struct HostedStorage {
    client: Client,
    base_url: String,
    service_key: String,
}

#[derive(Deserialize)]
struct SignedUploadResponse {
    url: String,
}

impl HostedStorage {
    pub fn new(base_url: &str, service_key: &str) -> Self {
        HostedStorage {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        }
    }

    fn endpoint(&self, tail: &str) -> String {
        format!("{}/storage/v1/{}", self.base_url, tail)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header(header::AUTHORIZATION, format!("Bearer {}", self.service_key))
            .header("apikey", &self.service_key)
    }

    async fn check(response: Response) -> Result<Response, StorageError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(StorageError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ObjectStorage for HostedStorage {
    async fn upload(
        &self,
        bucket: Bucket,
        path: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError> {
        let url = self.endpoint(&format!("object/{}/{}", bucket.name(), path));

        let response = self
            .authorized(self.client.post(url))
            .header(
                header::CONTENT_TYPE,
                content_type.unwrap_or("application/octet-stream"),
            )
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;
        Self::check(response).await?;

        tracing::info!("Uploaded {}/{}", bucket.name(), path);

        Ok(self.public_url(bucket, path))
    }

    async fn remove(&self, bucket: Bucket, paths: &[String]) -> Result<(), StorageError> {
        let url = self.endpoint(&format!("object/{}", bucket.name()));

        let response = self
            .authorized(self.client.delete(url))
            .json(&serde_json::json!({ "prefixes": paths }))
            .send()
            .await?;
        Self::check(response).await?;

        Ok(())
    }

    fn public_url(&self, bucket: Bucket, path: &str) -> String {
        self.endpoint(&format!("object/public/{}/{}", bucket.name(), path))
    }

    async fn create_signed_upload_url(
        &self,
        bucket: Bucket,
        path: &str,
    ) -> Result<String, StorageError> {
        let url = self.endpoint(&format!("object/upload/sign/{}/{}", bucket.name(), path));

        let response = self.authorized(self.client.post(url)).send().await?;
        let signed: SignedUploadResponse = Self::check(response).await?.json().await?;

        // The API answers with a path relative to /storage/v1.
        Ok(format!("{}/storage/v1{}", self.base_url, signed.url))
    }
}
