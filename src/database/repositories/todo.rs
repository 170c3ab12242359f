//! To-do repository backed by PostgreSQL

use std::time::Instant;
use async_trait::async_trait;
use sqlx::PgPool;
use crate::database::TodoStore;
use crate::models::TodoItem;
use crate::utils::errors::StorageResult;
use crate::utils::logging::log_storage_operation;

/// Stores items in `<table>(owner_id, created_at, text)` keyed by the first two columns
#[derive(Clone, Debug)]
pub struct TodoRepository {
    pool: PgPool,
    table: String,
}

impl TodoRepository {
    /// `table` must already be a validated identifier
    pub fn new(pool: PgPool, table: impl Into<String>) -> Self {
        Self { pool, table: table.into() }
    }

    /// Create the table if it does not exist yet
    pub async fn ensure_schema(&self) -> StorageResult<()> {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                owner_id   TEXT NOT NULL,
                created_at TEXT NOT NULL,
                text       TEXT NOT NULL,
                PRIMARY KEY (owner_id, created_at)
            )
            "#,
            self.table
        ))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn finish<T>(&self, operation: &str, started: Instant, result: sqlx::Result<T>) -> StorageResult<T> {
        log_storage_operation(operation, &self.table, started.elapsed().as_millis() as u64, result.is_ok());
        Ok(result?)
    }
}

#[async_trait]
impl TodoStore for TodoRepository {
    async fn put(&self, item: &TodoItem) -> StorageResult<()> {
        let started = Instant::now();
        let result = sqlx::query(&format!(
            r#"
            INSERT INTO {} (owner_id, created_at, text)
            VALUES ($1, $2, $3)
            ON CONFLICT (owner_id, created_at) DO UPDATE SET text = EXCLUDED.text
            "#,
            self.table
        ))
        .bind(&item.owner_id)
        .bind(&item.created_at)
        .bind(&item.text)
        .execute(&self.pool)
        .await;

        self.finish("put", started, result).map(|_| ())
    }

    async fn query_by_owner(&self, owner_id: &str) -> StorageResult<Vec<TodoItem>> {
        let started = Instant::now();
        let result = sqlx::query_as::<_, TodoItem>(&format!(
            "SELECT owner_id, created_at, text FROM {} WHERE owner_id = $1 ORDER BY created_at",
            self.table
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await;

        self.finish("query_by_owner", started, result)
    }

    async fn delete(&self, owner_id: &str, created_at: &str) -> StorageResult<()> {
        let started = Instant::now();
        let result = sqlx::query(&format!(
            "DELETE FROM {} WHERE owner_id = $1 AND created_at = $2",
            self.table
        ))
        .bind(owner_id)
        .bind(created_at)
        .execute(&self.pool)
        .await;

        self.finish("delete", started, result).map(|_| ())
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
