//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::DateTime;
use uuid::Uuid;
use crate::config::TimestampFormat;

/// Generate a new UUID v4
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Encode an event timestamp (epoch milliseconds) as a `created_at` key
///
/// Both encodings keep millisecond resolution, so distinct event timestamps
/// never share a key.
pub fn format_created_at(epoch_millis: i64, format: TimestampFormat) -> String {
    match format {
        TimestampFormat::EpochMillis => epoch_millis.to_string(),
        TimestampFormat::Datetime => match DateTime::from_timestamp_millis(epoch_millis) {
            Some(ts) => ts.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            // out of chrono's range; the raw value is still a unique key
            None => epoch_millis.to_string(),
        },
    }
}

/// Truncate text to at most `max_chars` characters, ending with an ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}
