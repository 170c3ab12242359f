//! Services module
//!
//! This module contains the outbound side of the bot: reply rendering and
//! the LINE Messaging API client, plus the factory wiring them to the store.

pub mod line;
pub mod render;

// Re-export commonly used services
pub use line::{LineClient, ReplyTransport};
pub use render::render;

use std::sync::Arc;
use crate::config::Settings;
use crate::database::TodoStore;
use crate::handlers::{CommandHandler, EventRouter, FailurePolicy};
use crate::i18n::I18n;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub store: Arc<dyn TodoStore>,
    pub transport: Arc<dyn ReplyTransport>,
    pub i18n: Arc<I18n>,
    settings: Settings,
}

impl ServiceFactory {
    /// Create a new ServiceFactory talking to the LINE API
    pub fn new(settings: Settings, store: Arc<dyn TodoStore>, i18n: I18n) -> Result<Self> {
        let transport = Arc::new(LineClient::new(&settings.line)?);
        Ok(Self::with_transport(settings, store, i18n, transport))
    }

    /// Create a ServiceFactory with a custom reply transport
    pub fn with_transport(
        settings: Settings,
        store: Arc<dyn TodoStore>,
        i18n: I18n,
        transport: Arc<dyn ReplyTransport>,
    ) -> Self {
        Self {
            store,
            transport,
            i18n: Arc::new(i18n),
            settings,
        }
    }

    pub fn command_handler(&self) -> CommandHandler {
        CommandHandler::new(
            self.store.clone(),
            self.i18n.clone(),
            self.settings.i18n.default_language.clone(),
        )
    }

    pub fn event_router(&self) -> EventRouter {
        EventRouter::new(
            self.command_handler(),
            self.transport.clone(),
            self.i18n.clone(),
            self.settings.i18n.default_language.clone(),
            self.settings.storage.timestamp_format,
            FailurePolicy::from_isolation_flag(self.settings.features.isolate_event_failures),
        )
    }
}
