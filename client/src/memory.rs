use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use deckedit_common::SavePayload;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{JsonStore, StoreError};

/// In-memory `JsonStore`. Missing files answer 404 and a persist failure
/// can be injected, so core tests exercise the same error paths the HTTP
/// store produces.
#[derive(Default)]
pub struct MemoryStore {
    files: Mutex<HashMap<String, Value>>,
    images: Mutex<HashSet<String>>,
    fail_persist: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, file_name: &str, doc: Value) -> Self {
        self.files.get_mut().insert(file_name.to_string(), doc);
        self
    }

    pub async fn insert(&self, file_name: &str, doc: Value) {
        self.files.lock().await.insert(file_name.to_string(), doc);
    }

    /// Current persisted document, as the server would hold it on disk.
    pub async fn document(&self, file_name: &str) -> Option<Value> {
        self.files.lock().await.get(file_name).cloned()
    }

    pub async fn add_image(&self, path: &str) {
        self.images.lock().await.insert(path.to_string());
    }

    /// Make every subsequent persist answer HTTP 500.
    pub fn fail_persist(&self, fail: bool) {
        self.fail_persist.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl JsonStore for MemoryStore {
    async fn fetch(&self, file_name: &str) -> Result<Value, StoreError> {
        self.files
            .lock()
            .await
            .get(file_name)
            .cloned()
            .ok_or_else(|| StoreError::Status {
                status: 404,
                resource: format!("json/{file_name}"),
            })
    }

    async fn persist(&self, payload: &SavePayload) -> Result<(), StoreError> {
        if self.fail_persist.load(Ordering::SeqCst) {
            return Err(StoreError::Status {
                status: 500,
                resource: "save-json".to_string(),
            });
        }
        self.files
            .lock()
            .await
            .insert(payload.file_name.clone(), payload.data.clone());
        Ok(())
    }

    async fn image_available(&self, path: &str) -> bool {
        self.images.lock().await.contains(path)
    }
}
