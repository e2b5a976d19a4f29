//! Storage abstraction layer
//!
//! Provides a unified key/value interface over S3 and the local filesystem.
//! Planet documents are kept as individual objects behind this trait.

use async_trait::async_trait;
use bytes::Bytes;

use crate::Result;

pub mod local;
pub mod s3;

/// Storage backend trait
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read object from storage; a missing key is [`crate::Error::ObjectNotFound`]
    async fn get(&self, key: &str) -> Result<Bytes>;

    /// Write object to storage, replacing any previous content
    async fn put(&self, key: &str, data: Bytes) -> Result<()>;

    /// Delete object from storage; deleting a missing key is not an error
    async fn delete(&self, key: &str) -> Result<()>;

    /// Check if object exists
    async fn exists(&self, key: &str) -> Result<bool>;

    /// List object keys under a prefix, sorted
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    S3 {
        bucket: String,
        region: String,
        endpoint: Option<String>,
        prefix: Option<String>,
    },
    Local {
        root_path: String,
    },
}

/// Create storage backend from config
pub async fn create_storage(config: StorageConfig) -> Result<Box<dyn StorageBackend>> {
    match config {
        StorageConfig::S3 {
            bucket,
            region,
            endpoint,
            prefix,
        } => {
            tracing::info!(%bucket, %region, "Using S3 storage");
            let backend = s3::S3Storage::new(bucket, region, endpoint, prefix).await?;
            Ok(Box::new(backend))
        }
        StorageConfig::Local { root_path } => {
            tracing::info!(path = %root_path, "Using local storage");
            let backend = local::LocalStorage::new(root_path)?;
            Ok(Box::new(backend))
        }
    }
}
