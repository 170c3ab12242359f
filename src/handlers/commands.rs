//! Command handler
//!
//! Turns one classified command into a single store call and the replies
//! describing its outcome.

use std::sync::Arc;
use tracing::{debug, error};
use crate::database::TodoStore;
use crate::handlers::intent::{classify, CommandInput, Intent};
use crate::i18n::{I18n, TranslationParams};
use crate::models::{ListAction, ReplyMessage, TodoItem};
use crate::utils::errors::HandlerError;
use crate::utils::logging::log_todo_action;

#[derive(Debug, Clone)]
pub struct CommandHandler {
    store: Arc<dyn TodoStore>,
    i18n: Arc<I18n>,
    language: String,
}

impl CommandHandler {
    pub fn new(store: Arc<dyn TodoStore>, i18n: Arc<I18n>, language: impl Into<String>) -> Self {
        Self {
            store,
            i18n,
            language: language.into(),
        }
    }

    /// Serve one command for `owner_id`
    ///
    /// `timestamp` becomes the key of a created item. A store failure ends
    /// the command without any reply.
    pub async fn handle(
        &self,
        owner_id: &str,
        timestamp: &str,
        input: &CommandInput,
    ) -> Result<Vec<ReplyMessage>, HandlerError> {
        let intent = classify(input);
        debug!(owner_id = owner_id, intent = ?intent, "Handling command");

        let result = match intent {
            Intent::Create { text } => self.create(owner_id, timestamp, text).await,
            Intent::List => self.list(owner_id).await,
            Intent::Complete { created_at } => self.complete(owner_id, created_at).await,
        };

        if let Err(e) = &result {
            error!(owner_id = owner_id, store = self.store.name(), error = %e, "Command failed");
        }
        result
    }

    async fn create(&self, owner_id: &str, timestamp: &str, text: &str) -> Result<Vec<ReplyMessage>, HandlerError> {
        let item = TodoItem::new(owner_id, timestamp, text);
        self.store.put(&item).await?;

        log_todo_action(owner_id, "create", Some(timestamp));
        Ok(vec![self.text("todo.registered")])
    }

    async fn list(&self, owner_id: &str) -> Result<Vec<ReplyMessage>, HandlerError> {
        let items = self.store.query_by_owner(owner_id).await?;

        log_todo_action(owner_id, "list", None);
        if items.is_empty() {
            return Ok(vec![self.text("todo.empty")]);
        }

        let params = TranslationParams::from([("count".to_string(), items.len().to_string())]);
        let actions = items
            .into_iter()
            .map(|item| ListAction {
                label: item.text,
                data: item.created_at,
            })
            .collect();

        Ok(vec![ReplyMessage::ActionList {
            title: self.i18n.t("todo.list_title", &self.language, Some(&params)),
            actions,
        }])
    }

    async fn complete(&self, owner_id: &str, created_at: &str) -> Result<Vec<ReplyMessage>, HandlerError> {
        self.store.delete(owner_id, created_at).await?;

        log_todo_action(owner_id, "complete", Some(created_at));
        Ok(vec![self.text("todo.deleted")])
    }

    fn text(&self, key: &str) -> ReplyMessage {
        ReplyMessage::text(self.i18n.t(key, &self.language, None))
    }
}
