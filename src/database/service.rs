//! Store backend selection
//!
//! Builds the single long-lived store shared by every webhook delivery.

use std::sync::Arc;
use tracing::info;
use crate::config::{StorageBackend, StorageConfig};
use crate::database::{connection, MemoryTodoStore, RedisTodoStore, TodoRepository, TodoStore};
use crate::utils::errors::{StorageError, StorageResult};

/// Connect to the configured backend
pub async fn connect_store(config: &StorageConfig) -> StorageResult<Arc<dyn TodoStore>> {
    let store: Arc<dyn TodoStore> = match config.backend {
        StorageBackend::Postgres => {
            info!(table = %config.table_name, "Connecting to PostgreSQL store...");
            let pool = connection::create_pool(&connection::DatabaseConfig::from_storage(config)).await?;
            let repository = TodoRepository::new(pool, config.table_name.clone());
            repository.ensure_schema().await?;
            Arc::new(repository)
        }
        StorageBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .ok_or_else(|| StorageError::Unavailable("redis_url is not configured".to_string()))?;
            info!(table = %config.table_name, "Connecting to Redis store...");
            Arc::new(RedisTodoStore::new(url, config.redis_prefix.clone(), config.table_name.clone()).await?)
        }
        StorageBackend::Memory => {
            info!("Using in-memory store; items are lost on restart");
            Arc::new(MemoryTodoStore::new())
        }
    };

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn test_memory_backend_needs_no_connection() {
        let mut config = Settings::default().storage;
        config.backend = StorageBackend::Memory;

        let store = connect_store(&config).await.unwrap();
        assert_eq!(store.name(), "memory");
    }

    #[tokio::test]
    async fn test_redis_backend_without_url_fails() {
        let mut config = Settings::default().storage;
        config.backend = StorageBackend::Redis;
        config.redis_url = None;

        assert_matches!(connect_store(&config).await, Err(StorageError::Unavailable(_)));
    }
}
