//! To-do store backed by Redis
//!
//! Each owner gets one hash at `<prefix><table>:<owner_id>` mapping
//! `created_at` to the item text, so every operation is a single command.

use std::collections::HashMap;
use std::time::Instant;
use async_trait::async_trait;
use redis::AsyncCommands;
use crate::database::TodoStore;
use crate::models::TodoItem;
use crate::utils::errors::StorageResult;
use crate::utils::logging::log_storage_operation;

#[derive(Clone)]
pub struct RedisTodoStore {
    connection_manager: redis::aio::ConnectionManager,
    prefix: String,
    table: String,
}

impl std::fmt::Debug for RedisTodoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisTodoStore")
            .field("prefix", &self.prefix)
            .field("table", &self.table)
            .finish()
    }
}

impl RedisTodoStore {
    /// Connect and keep one multiplexed connection for the process lifetime
    pub async fn new(url: &str, prefix: impl Into<String>, table: impl Into<String>) -> StorageResult<Self> {
        let client = redis::Client::open(url)?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            prefix: prefix.into(),
            table: table.into(),
        })
    }

    fn owner_key(&self, owner_id: &str) -> String {
        format!("{}{}:{}", self.prefix, self.table, owner_id)
    }

    fn record<T>(&self, operation: &str, started: Instant, result: redis::RedisResult<T>) -> StorageResult<T> {
        log_storage_operation(operation, &self.table, started.elapsed().as_millis() as u64, result.is_ok());
        Ok(result?)
    }
}

#[async_trait]
impl TodoStore for RedisTodoStore {
    async fn put(&self, item: &TodoItem) -> StorageResult<()> {
        let started = Instant::now();
        let mut conn = self.connection_manager.clone();
        let result: redis::RedisResult<()> = conn
            .hset(self.owner_key(&item.owner_id), &item.created_at, &item.text)
            .await;

        self.record("put", started, result)
    }

    async fn query_by_owner(&self, owner_id: &str) -> StorageResult<Vec<TodoItem>> {
        let started = Instant::now();
        let mut conn = self.connection_manager.clone();
        let result: redis::RedisResult<HashMap<String, String>> = conn.hgetall(self.owner_key(owner_id)).await;
        let entries = self.record("query_by_owner", started, result)?;

        let mut items: Vec<TodoItem> = entries
            .into_iter()
            .map(|(created_at, text)| TodoItem::new(owner_id, created_at, text))
            .collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        Ok(items)
    }

    async fn delete(&self, owner_id: &str, created_at: &str) -> StorageResult<()> {
        let started = Instant::now();
        let mut conn = self.connection_manager.clone();
        let result: redis::RedisResult<()> = conn.hdel(self.owner_key(owner_id), created_at).await;

        self.record("delete", started, result)
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
