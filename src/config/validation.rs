//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{TodoBuddyError, Result};
use super::{Settings, StorageBackend};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_line_config(&settings.line)?;
    validate_server_config(&settings.server)?;
    validate_storage_config(&settings.storage)?;
    validate_i18n_config(&settings.i18n)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate LINE channel configuration
fn validate_line_config(config: &super::LineConfig) -> Result<()> {
    if config.channel_secret.is_empty() {
        return Err(TodoBuddyError::Config(
            "Channel secret is required".to_string()
        ));
    }

    if config.channel_access_token.is_empty() {
        return Err(TodoBuddyError::Config(
            "Channel access token is required".to_string()
        ));
    }

    url::Url::parse(&config.api_base_url)?;

    if config.timeout_seconds == 0 {
        return Err(TodoBuddyError::Config(
            "LINE API timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(TodoBuddyError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(TodoBuddyError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate keyed store configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if !is_valid_identifier(&config.table_name) {
        return Err(TodoBuddyError::Config(
            format!("Invalid table name: {:?}. Use letters, digits and underscores", config.table_name)
        ));
    }

    match config.backend {
        StorageBackend::Postgres => {
            if config.database_url.as_deref().map_or(true, str::is_empty) {
                return Err(TodoBuddyError::Config(
                    "Database URL is required for the postgres backend".to_string()
                ));
            }

            if config.max_connections == 0 {
                return Err(TodoBuddyError::Config(
                    "Max connections must be greater than 0".to_string()
                ));
            }

            if config.min_connections > config.max_connections {
                return Err(TodoBuddyError::Config(
                    "Min connections cannot be greater than max connections".to_string()
                ));
            }
        }
        StorageBackend::Redis => {
            if config.redis_url.as_deref().map_or(true, str::is_empty) {
                return Err(TodoBuddyError::Config(
                    "Redis URL is required for the redis backend".to_string()
                ));
            }
        }
        StorageBackend::Memory => {}
    }

    Ok(())
}

/// Validate internationalization configuration
fn validate_i18n_config(config: &super::I18nConfig) -> Result<()> {
    if config.default_language.is_empty() {
        return Err(TodoBuddyError::Config(
            "Default language is required".to_string()
        ));
    }

    if !config.supported_languages.contains(&config.default_language) {
        return Err(TodoBuddyError::Config(
            "Default language must be in supported languages list".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(TodoBuddyError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

/// Table names are interpolated into SQL, so only plain identifiers pass
fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
