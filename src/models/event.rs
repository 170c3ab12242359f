//! LINE webhook event model
//!
//! Only the event kinds the bot reacts to are modelled; everything else
//! deserializes into an explicit `Other` variant.

use serde::{Deserialize, Serialize};

/// Webhook delivery envelope
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallbackRequest {
    #[serde(default)]
    pub destination: Option<String>,
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WebhookEvent {
    Follow(FollowEvent),
    Message(MessageEvent),
    Postback(PostbackEvent),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowEvent {
    /// Absent for events delivered to a channel in standby mode
    #[serde(default)]
    pub reply_token: Option<String>,
    pub timestamp: i64,
    pub source: Source,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    /// Absent for events delivered to a channel in standby mode
    #[serde(default)]
    pub reply_token: Option<String>,
    pub timestamp: i64,
    pub source: Source,
    pub message: MessageContent,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostbackEvent {
    /// Absent for events delivered to a channel in standby mode
    #[serde(default)]
    pub reply_token: Option<String>,
    pub timestamp: i64,
    pub source: Source,
    pub postback: Postback,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Postback {
    pub data: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    Text(TextContent),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TextContent {
    #[serde(default)]
    pub id: Option<String>,
    pub text: String,
}

/// Where an event came from
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Source {
    User(UserSource),
    Group(GroupSource),
    Room(RoomSource),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSource {
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSource {
    pub group_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSource {
    pub room_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Source {
    /// Identity that owns the conversation's to-do items
    ///
    /// Groups and rooms share one list across members, so their ids win over
    /// the sending user's id.
    pub fn owner_id(&self) -> Option<&str> {
        let id = match self {
            Source::User(user) => user.user_id.as_str(),
            Source::Group(group) => group.group_id.as_str(),
            Source::Room(room) => room.room_id.as_str(),
            Source::Unknown => return None,
        };

        if id.is_empty() { None } else { Some(id) }
    }
}

impl WebhookEvent {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            WebhookEvent::Follow(_) => "follow",
            WebhookEvent::Message(_) => "message",
            WebhookEvent::Postback(_) => "postback",
            WebhookEvent::Other => "other",
        }
    }
}
