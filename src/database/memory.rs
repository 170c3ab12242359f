//! In-process to-do store
//!
//! Useful for local runs without a database; contents are lost on restart.

use std::collections::{BTreeMap, HashMap};
use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::database::TodoStore;
use crate::models::TodoItem;
use crate::utils::errors::StorageResult;

#[derive(Debug, Default)]
pub struct MemoryTodoStore {
    // owner_id -> created_at -> text
    items: RwLock<HashMap<String, BTreeMap<String, String>>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored items across owners
    pub async fn len(&self) -> usize {
        self.items.read().await.values().map(BTreeMap::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn put(&self, item: &TodoItem) -> StorageResult<()> {
        self.items
            .write()
            .await
            .entry(item.owner_id.clone())
            .or_default()
            .insert(item.created_at.clone(), item.text.clone());
        Ok(())
    }

    async fn query_by_owner(&self, owner_id: &str) -> StorageResult<Vec<TodoItem>> {
        let items = self.items.read().await;
        Ok(items
            .get(owner_id)
            .map(|owned| {
                owned
                    .iter()
                    .map(|(created_at, text)| TodoItem::new(owner_id, created_at.as_str(), text.as_str()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn delete(&self, owner_id: &str, created_at: &str) -> StorageResult<()> {
        let mut items = self.items.write().await;
        if let Some(owned) = items.get_mut(owner_id) {
            owned.remove(created_at);
            if owned.is_empty() {
                items.remove(owner_id);
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
