//! Test data helpers for creating webhook events
//!
//! This module provides helper functions for building LINE webhook events and
//! delivery bodies the way the platform sends them.

use serde_json::{json, Value};
use TodoBuddy::models::WebhookEvent;

/// Source of a one-to-one chat
pub fn user_source(user_id: &str) -> Value {
    json!({ "type": "user", "userId": user_id })
}

/// Source of a group chat, sent by `user_id`
pub fn group_source(group_id: &str, user_id: &str) -> Value {
    json!({ "type": "group", "groupId": group_id, "userId": user_id })
}

/// Source of a multi-person room
pub fn room_source(room_id: &str) -> Value {
    json!({ "type": "room", "roomId": room_id })
}

pub fn text_message_event(source: Value, timestamp: i64, text: &str) -> Value {
    json!({
        "type": "message",
        "mode": "active",
        "webhookEventId": format!("evt-{}", timestamp),
        "replyToken": format!("reply-{}", timestamp),
        "timestamp": timestamp,
        "source": source,
        "message": { "type": "text", "id": timestamp.to_string(), "text": text }
    })
}

/// Text message seen by a channel in standby mode; LINE sends no reply token
pub fn standby_text_message_event(source: Value, timestamp: i64, text: &str) -> Value {
    json!({
        "type": "message",
        "mode": "standby",
        "webhookEventId": format!("evt-{}", timestamp),
        "timestamp": timestamp,
        "source": source,
        "message": { "type": "text", "id": timestamp.to_string(), "text": text }
    })
}

pub fn sticker_message_event(source: Value, timestamp: i64) -> Value {
    json!({
        "type": "message",
        "replyToken": format!("reply-{}", timestamp),
        "timestamp": timestamp,
        "source": source,
        "message": { "type": "sticker", "id": timestamp.to_string(), "packageId": "446", "stickerId": "1988" }
    })
}

pub fn postback_event(source: Value, timestamp: i64, data: &str) -> Value {
    json!({
        "type": "postback",
        "replyToken": format!("reply-{}", timestamp),
        "timestamp": timestamp,
        "source": source,
        "postback": { "data": data }
    })
}

pub fn follow_event(source: Value, timestamp: i64) -> Value {
    json!({
        "type": "follow",
        "replyToken": format!("reply-{}", timestamp),
        "timestamp": timestamp,
        "source": source
    })
}

pub fn unfollow_event(source: Value, timestamp: i64) -> Value {
    json!({ "type": "unfollow", "timestamp": timestamp, "source": source })
}

/// Webhook delivery body containing `events`
pub fn callback_body(events: Vec<Value>) -> String {
    json!({ "destination": "Ubot", "events": events }).to_string()
}

/// Parse event JSON into the typed model
pub fn parse_events(events: Vec<Value>) -> Vec<WebhookEvent> {
    events
        .into_iter()
        .map(|event| serde_json::from_value(event).expect("test event should parse"))
        .collect()
}
