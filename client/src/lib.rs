//! Transport seam between the editor and the deck server.
//!
//! The editor core only talks to a [`JsonStore`]; `HttpStore` is the real
//! thing and `MemoryStore` stands in for it in tests and offline runs.

pub mod http;
pub mod memory;

use async_trait::async_trait;
use deckedit_common::SavePayload;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("HTTP status {status} for {resource}")]
    Status { status: u16, resource: String },

    #[error("transport error for {resource}: {message}")]
    Transport { resource: String, message: String },

    #[error("malformed JSON in {resource}: {source}")]
    Parse {
        resource: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Read/write access to the deck documents behind the server.
#[async_trait]
pub trait JsonStore: Send + Sync {
    /// Fetch `json/<file_name>` and parse it as JSON. Non-2xx is an error;
    /// no shape checking happens here.
    async fn fetch(&self, file_name: &str) -> Result<Value, StoreError>;

    /// Submit a reassembled document to the persistence endpoint.
    async fn persist(&self, payload: &SavePayload) -> Result<(), StoreError>;

    /// Whether the preview image at `path` is servable. This is display
    /// support only: any failure just means "not available".
    async fn image_available(&self, path: &str) -> bool;
}

pub use http::HttpStore;
pub use memory::MemoryStore;
