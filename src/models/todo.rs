//! To-do item model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One task, keyed by `(owner_id, created_at)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub owner_id: String,
    pub created_at: String,
    pub text: String,
}

impl TodoItem {
    pub fn new(owner_id: impl Into<String>, created_at: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            created_at: created_at.into(),
            text: text.into(),
        }
    }
}
