use async_trait::async_trait;
use deckedit_common::SavePayload;
use serde_json::Value;

use crate::{JsonStore, StoreError};

/// `JsonStore` backed by the deck server over HTTP.
pub struct HttpStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn transport(resource: &str, err: reqwest::Error) -> StoreError {
        StoreError::Transport {
            resource: resource.to_string(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl JsonStore for HttpStore {
    async fn fetch(&self, file_name: &str) -> Result<Value, StoreError> {
        let resource = format!("json/{file_name}");
        let resp = self
            .client
            .get(self.url(&resource))
            .send()
            .await
            .map_err(|e| Self::transport(&resource, e))?;

        let status = resp.status();
        tracing::debug!("GET {} -> {}", resource, status);
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                resource,
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| Self::transport(&resource, e))?;
        serde_json::from_str(&body).map_err(|source| StoreError::Parse { resource, source })
    }

    async fn persist(&self, payload: &SavePayload) -> Result<(), StoreError> {
        let resource = "save-json".to_string();
        let resp = self
            .client
            .post(self.url(&resource))
            .json(payload)
            .send()
            .await
            .map_err(|e| Self::transport(&resource, e))?;

        let status = resp.status();
        tracing::debug!("POST {} ({}) -> {}", resource, payload.file_name, status);
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                resource,
            });
        }
        Ok(())
    }

    async fn image_available(&self, path: &str) -> bool {
        match self.client.get(self.url(path)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                tracing::debug!("image probe {} failed: {}", path, e);
                false
            }
        }
    }
}
