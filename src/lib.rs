//! TodoBuddy LINE Bot
//!
//! A LINE bot that keeps a to-do list per conversation. Text messages create
//! tasks, `list` shows them as tappable buttons, and tapping a button
//! completes (deletes) the task.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod database;
pub mod i18n;
pub mod utils;
pub mod middleware;
pub mod server;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{TodoBuddyError, Result};

// Re-export main components for easy access
pub use database::TodoStore;
pub use handlers::{CommandHandler, EventRouter};
pub use services::ServiceFactory;
pub use i18n::I18n;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
