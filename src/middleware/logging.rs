//! Logging middleware
//!
//! Structured summaries of incoming webhook events. Message text and
//! postback data are only logged at debug level.

use tracing::{debug, info};
use crate::models::{MessageContent, WebhookEvent};

/// Log an incoming webhook event
pub fn log_event(event: &WebhookEvent) {
    match event {
        WebhookEvent::Follow(follow) => {
            info!(owner_id = ?follow.source.owner_id(), "Follow event received");
        }
        WebhookEvent::Message(message) => match &message.message {
            MessageContent::Text(content) => {
                info!(
                    owner_id = ?message.source.owner_id(),
                    timestamp = message.timestamp,
                    "Text message received"
                );
                debug!(text = %content.text, "Message text");
            }
            MessageContent::Other => {
                debug!(owner_id = ?message.source.owner_id(), "Non-text message received");
            }
        },
        WebhookEvent::Postback(postback) => {
            info!(
                owner_id = ?postback.source.owner_id(),
                timestamp = postback.timestamp,
                "Postback received"
            );
            debug!(data = %postback.postback.data, "Postback data");
        }
        WebhookEvent::Other => {
            debug!("Unhandled event kind received");
        }
    }
}
