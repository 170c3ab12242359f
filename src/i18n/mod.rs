//! Internationalization module
//!
//! This module handles the reply texts of the bot in every supported language.

pub mod loader;

// Re-export commonly used i18n components
pub use loader::{I18n, TranslationParams};
