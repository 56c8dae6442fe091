//! Storage trait definitions

use async_trait::async_trait;

use crate::domain::DomainResult;

/// Key-value persistence for serialized client state
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> DomainResult<()>;
    async fn remove(&self, key: &str) -> DomainResult<()>;
}
