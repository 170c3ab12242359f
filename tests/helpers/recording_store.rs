//! Store double that records every call
//!
//! Wraps the in-memory store, remembers each operation it receives, and can
//! be told to fail every call for selected owners.

use std::collections::HashSet;
use std::sync::Mutex;
use async_trait::async_trait;
use TodoBuddy::database::{MemoryTodoStore, TodoStore};
use TodoBuddy::models::TodoItem;
use TodoBuddy::utils::errors::{StorageError, StorageResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Put(TodoItem),
    QueryByOwner(String),
    Delete { owner_id: String, created_at: String },
}

#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: MemoryTodoStore,
    calls: Mutex<Vec<StoreCall>>,
    failing_owners: Mutex<HashSet<String>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an item without recording a call
    pub async fn seed(&self, item: TodoItem) {
        self.inner.put(&item).await.expect("memory store never fails");
    }

    /// Make every call for `owner_id` fail
    pub fn fail_for(&self, owner_id: &str) {
        self.failing_owners.lock().unwrap().insert(owner_id.to_string());
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub async fn items(&self, owner_id: &str) -> Vec<TodoItem> {
        self.inner.query_by_owner(owner_id).await.expect("memory store never fails")
    }

    fn record(&self, owner_id: &str, call: StoreCall) -> StorageResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing_owners.lock().unwrap().contains(owner_id) {
            return Err(StorageError::Unavailable(format!("injected failure for {}", owner_id)));
        }
        Ok(())
    }
}

#[async_trait]
impl TodoStore for RecordingStore {
    async fn put(&self, item: &TodoItem) -> StorageResult<()> {
        self.record(&item.owner_id, StoreCall::Put(item.clone()))?;
        self.inner.put(item).await
    }

    async fn query_by_owner(&self, owner_id: &str) -> StorageResult<Vec<TodoItem>> {
        self.record(owner_id, StoreCall::QueryByOwner(owner_id.to_string()))?;
        self.inner.query_by_owner(owner_id).await
    }

    async fn delete(&self, owner_id: &str, created_at: &str) -> StorageResult<()> {
        self.record(owner_id, StoreCall::Delete {
            owner_id: owner_id.to_string(),
            created_at: created_at.to_string(),
        })?;
        self.inner.delete(owner_id, created_at).await
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
