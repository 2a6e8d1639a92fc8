use async_trait::async_trait;

use crate::domain::errors::StorageError;

/// Key-value persistence port. Values are opaque strings; callers own the
/// serialization format stored under each key.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
