//! Bot handlers module
//!
//! This module contains the webhook event handling pipeline:
//! - Intent classification of text messages and postbacks
//! - The command handler that performs store operations
//! - The event router that dispatches each webhook event

pub mod intent;
pub mod commands;
pub mod router;

// Re-export commonly used handler types
pub use intent::{classify, CommandInput, Intent, LIST_KEYWORD};
pub use commands::CommandHandler;
pub use router::{EventRouter, EventOutcome, FailurePolicy, DispatchReport, RoutedReply};
