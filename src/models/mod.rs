//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod todo;
pub mod event;
pub mod reply;

// Re-export commonly used models
pub use todo::TodoItem;
pub use event::{CallbackRequest, WebhookEvent, FollowEvent, MessageEvent, PostbackEvent, MessageContent, Source};
pub use reply::{ReplyMessage, ListAction, LineMessage, ReplyMessageRequest};
