//! Keyed store abstraction for to-do items
//!
//! Items are addressed by `(owner_id, created_at)`. Every method maps to a
//! single call against the backing store with no caching or retries.

use async_trait::async_trait;
use crate::models::TodoItem;
use crate::utils::errors::StorageResult;

#[async_trait]
pub trait TodoStore: Send + Sync + std::fmt::Debug {
    /// Insert or overwrite the item at its key
    async fn put(&self, item: &TodoItem) -> StorageResult<()>;

    /// All items of one owner, in no guaranteed order
    async fn query_by_owner(&self, owner_id: &str) -> StorageResult<Vec<TodoItem>>;

    /// Remove the item at the key; a missing key is not an error
    async fn delete(&self, owner_id: &str, created_at: &str) -> StorageResult<()>;

    /// Backend name for logs
    fn name(&self) -> &'static str;
}
