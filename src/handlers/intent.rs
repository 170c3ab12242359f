//! Intent classification
//!
//! Decides what a message or postback asks the bot to do. Classification is
//! total: any text that is not a keyword becomes a new task.

/// Keyword that lists the conversation's tasks
pub const LIST_KEYWORD: &str = "list";

/// Raw user input for one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandInput {
    /// Free text typed by the user
    Text(String),
    /// Data of a tapped list action, i.e. the `created_at` key of an item
    PostbackKey(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent<'a> {
    Create { text: &'a str },
    List,
    Complete { created_at: &'a str },
}

pub fn classify(input: &CommandInput) -> Intent<'_> {
    match input {
        CommandInput::PostbackKey(key) => Intent::Complete { created_at: key },
        CommandInput::Text(text) if text == LIST_KEYWORD => Intent::List,
        CommandInput::Text(text) => Intent::Create { text },
    }
}
