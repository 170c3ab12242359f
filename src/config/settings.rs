//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::Path;
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub line: LineConfig,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub i18n: I18nConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// LINE Messaging API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LineConfig {
    pub channel_secret: String,
    pub channel_access_token: String,
    pub api_base_url: String,
    pub timeout_seconds: u64,
}

/// Webhook server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Which keyed store holds the to-do items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Redis,
    Memory,
}

/// How the `created_at` key is encoded from the event timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// Decimal epoch milliseconds, e.g. `1462629479859`
    EpochMillis,
    /// `YYYY-MM-DD HH:MM:SS.mmm` in UTC
    Datetime,
}

/// Keyed store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub table_name: String,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub redis_url: Option<String>,
    pub redis_prefix: String,
    pub timestamp_format: TimestampFormat,
}

/// Internationalization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct I18nConfig {
    pub default_language: String,
    pub supported_languages: Vec<String>,
    pub translations_dir: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling log file; stdout only when unset
    pub file_path: Option<String>,
    pub json: bool,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturesConfig {
    /// Keep processing the remaining events of a delivery after one fails
    pub isolate_event_failures: bool,
}

/// Conventional deployment variables mapped onto nested keys
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("CHANNEL_SECRET", "line.channel_secret"),
    ("CHANNEL_TOKEN", "line.channel_access_token"),
    ("TABLE_NAME", "storage.table_name"),
    ("DATABASE_URL", "storage.database_url"),
    ("REDIS_URL", "storage.redis_url"),
];

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load(config::File::with_name("config").required(false))
    }

    /// Load settings with an explicit configuration file instead of `config.*`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::load(config::File::from(path.as_ref()))
    }

    fn load(file: config::File<config::FileSourceFile, config::FileFormat>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("TODOBUDDY")
                    .prefix_separator("_")
                    .separator("__"),
            );

        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(*key, std::env::var(var).ok())?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::TodoBuddyError> {
        super::validation::validate_settings(self)
    }

    /// Address the webhook server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            line: LineConfig {
                channel_secret: String::new(),
                channel_access_token: String::new(),
                api_base_url: "https://api.line.me".to_string(),
                timeout_seconds: 10,
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            storage: StorageConfig {
                backend: StorageBackend::Postgres,
                table_name: "todos".to_string(),
                database_url: None,
                max_connections: 10,
                min_connections: 1,
                redis_url: None,
                redis_prefix: "todobuddy:".to_string(),
                timestamp_format: TimestampFormat::EpochMillis,
            },
            i18n: I18nConfig {
                default_language: "ja".to_string(),
                supported_languages: vec!["ja".to_string(), "en".to_string()],
                translations_dir: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                json: false,
            },
            features: FeaturesConfig {
                isolate_event_failures: true,
            },
        }
    }
}
