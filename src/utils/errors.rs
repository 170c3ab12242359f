//! Error handling for TodoBuddy
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for TodoBuddy application
#[derive(Error, Debug)]
pub enum TodoBuddyError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Command handling error: {0}")]
    Handler(#[from] HandlerError),

    #[error("LINE API error: {0}")]
    Line(#[from] LineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Keyed store errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while serving a single command
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("storage operation failed: {0}")]
    Storage(#[from] StorageError),

    /// Malformed command input; unreachable while classification is total
    #[error("cannot classify input: {0}")]
    Classification(String),
}

/// LINE Messaging API specific errors
#[derive(Error, Debug)]
pub enum LineError {
    #[error("LINE API request failed: {0}")]
    RequestFailed(String),

    #[error("LINE API timeout")]
    Timeout,

    #[error("LINE API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("LINE API unavailable")]
    ServiceUnavailable,
}

/// Result type alias for TodoBuddy operations
pub type Result<T> = std::result::Result<T, TodoBuddyError>;

/// Result type alias for keyed store operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Result type alias for LINE API operations
pub type LineResult<T> = std::result::Result<T, LineError>;

impl TodoBuddyError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            TodoBuddyError::Storage(_) => true,
            TodoBuddyError::Handler(HandlerError::Storage(_)) => true,
            TodoBuddyError::Handler(HandlerError::Classification(_)) => false,
            TodoBuddyError::Line(LineError::Api { status, .. }) => *status >= 500,
            TodoBuddyError::Line(_) => true,
            TodoBuddyError::Config(_) => false,
            TodoBuddyError::ConfigLoad(_) => false,
            TodoBuddyError::Authentication(_) => false,
            TodoBuddyError::Serialization(_) => false,
            TodoBuddyError::Io(_) => true,
            TodoBuddyError::UrlParse(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TodoBuddyError::Config(_) => ErrorSeverity::Critical,
            TodoBuddyError::ConfigLoad(_) => ErrorSeverity::Critical,
            TodoBuddyError::Authentication(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
