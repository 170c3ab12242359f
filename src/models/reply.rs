//! Reply models
//!
//! `ReplyMessage` is what command handling produces; `LineMessage` is the
//! wire shape the Messaging API accepts.

use serde::{Deserialize, Serialize};

/// Transport-independent reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyMessage {
    Text(String),
    ActionList {
        title: String,
        actions: Vec<ListAction>,
    },
}

/// One tappable entry of an action list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListAction {
    pub label: String,
    /// Opaque data returned in the postback when tapped
    pub data: String,
}

impl ReplyMessage {
    pub fn text(text: impl Into<String>) -> Self {
        ReplyMessage::Text(text.into())
    }
}

/// Message object of the LINE reply API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LineMessage {
    Text {
        text: String,
    },
    Flex {
        #[serde(rename = "altText")]
        alt_text: String,
        contents: serde_json::Value,
    },
}

/// Body of `POST /v2/bot/message/reply`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyMessageRequest<'a> {
    pub reply_token: &'a str,
    pub messages: &'a [LineMessage],
}
