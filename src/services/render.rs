//! Reply rendering
//!
//! Maps transport-independent replies onto LINE message objects. Action lists
//! become a Flex bubble with one postback button per action.

use serde_json::{json, Value};
use crate::models::{LineMessage, ListAction, ReplyMessage};
use crate::utils::helpers::truncate_text;

/// Longest label a Flex button accepts
pub const LABEL_MAX_CHARS: usize = 40;

/// Render replies in order
pub fn render(messages: &[ReplyMessage]) -> Vec<LineMessage> {
    messages.iter().map(render_message).collect()
}

fn render_message(message: &ReplyMessage) -> LineMessage {
    match message {
        ReplyMessage::Text(text) => LineMessage::Text { text: text.clone() },
        ReplyMessage::ActionList { title, actions } if actions.is_empty() => {
            LineMessage::Text { text: title.clone() }
        }
        ReplyMessage::ActionList { title, actions } => LineMessage::Flex {
            alt_text: title.clone(),
            contents: action_bubble(title, actions),
        },
    }
}

fn action_bubble(title: &str, actions: &[ListAction]) -> Value {
    let mut contents = vec![json!({
        "type": "text",
        "text": title,
        "weight": "bold",
        "size": "lg",
    })];

    contents.extend(actions.iter().map(|action| {
        json!({
            "type": "button",
            "style": "secondary",
            "height": "sm",
            "action": {
                "type": "postback",
                "label": truncate_text(&action.label, LABEL_MAX_CHARS),
                "data": action.data,
            },
        })
    }));

    json!({
        "type": "bubble",
        "body": {
            "type": "box",
            "layout": "vertical",
            "spacing": "sm",
            "contents": contents,
        },
    })
}
