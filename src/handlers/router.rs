//! Event router
//!
//! Demultiplexes webhook events: follows get a static welcome, text messages
//! and postbacks go through the command handler, everything else is ignored.

use std::sync::Arc;
use tracing::{debug, error, info_span, warn, Instrument};
use crate::config::TimestampFormat;
use crate::handlers::commands::CommandHandler;
use crate::handlers::intent::CommandInput;
use crate::i18n::I18n;
use crate::middleware::logging::log_event;
use crate::models::{MessageContent, ReplyMessage, Source, WebhookEvent};
use crate::services::line::ReplyTransport;
use crate::services::render::render;
use crate::utils::errors::{HandlerError, Result};
use crate::utils::helpers::{format_created_at, generate_uuid};

/// What to do with the remaining events of a delivery after one fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure and continue with the next event
    Isolate,
    /// Stop processing the delivery at the first failure
    AbortBatch,
}

impl FailurePolicy {
    pub fn from_isolation_flag(isolate: bool) -> Self {
        if isolate { FailurePolicy::Isolate } else { FailurePolicy::AbortBatch }
    }
}

/// Replies routed for one event, not yet rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedReply {
    pub reply_token: String,
    pub messages: Vec<ReplyMessage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Replied,
    Ignored,
}

/// Per-delivery counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub replied: usize,
    pub ignored: usize,
    pub failed: usize,
    /// Events left unprocessed because an earlier one failed
    pub skipped: usize,
}

pub struct EventRouter {
    commands: CommandHandler,
    transport: Arc<dyn ReplyTransport>,
    i18n: Arc<I18n>,
    language: String,
    timestamp_format: TimestampFormat,
    policy: FailurePolicy,
}

impl EventRouter {
    pub fn new(
        commands: CommandHandler,
        transport: Arc<dyn ReplyTransport>,
        i18n: Arc<I18n>,
        language: impl Into<String>,
        timestamp_format: TimestampFormat,
        policy: FailurePolicy,
    ) -> Self {
        Self {
            commands,
            transport,
            i18n,
            language: language.into(),
            timestamp_format,
            policy,
        }
    }

    /// Decide the replies for one event without sending them
    ///
    /// Events without a reply token (standby mode) are ignored before any
    /// store access.
    pub async fn route(&self, event: &WebhookEvent) -> std::result::Result<Option<RoutedReply>, HandlerError> {
        let (reply_token, messages) = match event {
            WebhookEvent::Follow(follow) => {
                let Some(reply_token) = reply_token_of(follow.reply_token.as_deref()) else {
                    return Ok(None);
                };
                let welcome = self.i18n.t("follow.welcome", &self.language, None);
                (reply_token, vec![ReplyMessage::text(welcome)])
            }
            WebhookEvent::Message(message) => {
                let MessageContent::Text(content) = &message.message else {
                    return Ok(None);
                };
                let Some(reply_token) = reply_token_of(message.reply_token.as_deref()) else {
                    return Ok(None);
                };
                let Some(owner_id) = owner_of(&message.source) else {
                    return Ok(None);
                };
                let timestamp = format_created_at(message.timestamp, self.timestamp_format);
                let input = CommandInput::Text(content.text.clone());
                (reply_token, self.commands.handle(owner_id, &timestamp, &input).await?)
            }
            WebhookEvent::Postback(postback) => {
                let Some(reply_token) = reply_token_of(postback.reply_token.as_deref()) else {
                    return Ok(None);
                };
                let Some(owner_id) = owner_of(&postback.source) else {
                    return Ok(None);
                };
                let timestamp = format_created_at(postback.timestamp, self.timestamp_format);
                let input = CommandInput::PostbackKey(postback.postback.data.clone());
                (reply_token, self.commands.handle(owner_id, &timestamp, &input).await?)
            }
            WebhookEvent::Other => return Ok(None),
        };

        Ok(Some(RoutedReply {
            reply_token: reply_token.to_string(),
            messages,
        }))
    }

    /// Route one event and send its replies
    pub async fn handle_event(&self, event: &WebhookEvent) -> Result<EventOutcome> {
        log_event(event);

        let Some(routed) = self.route(event).await? else {
            return Ok(EventOutcome::Ignored);
        };

        let rendered = render(&routed.messages);
        self.transport.reply(&routed.reply_token, &rendered).await?;
        Ok(EventOutcome::Replied)
    }

    /// Handle every event of one webhook delivery in order
    pub async fn dispatch(&self, events: &[WebhookEvent]) -> DispatchReport {
        let span = info_span!("delivery", delivery_id = %generate_uuid(), events = events.len());

        async move {
            let mut report = DispatchReport::default();

            for (index, event) in events.iter().enumerate() {
                match self.handle_event(event).await {
                    Ok(EventOutcome::Replied) => report.replied += 1,
                    Ok(EventOutcome::Ignored) => report.ignored += 1,
                    Err(e) => {
                        report.failed += 1;
                        error!(
                            event_index = index,
                            event_kind = event.kind(),
                            severity = %e.severity(),
                            recoverable = e.is_recoverable(),
                            error = %e,
                            "Failed to handle event"
                        );

                        if self.policy == FailurePolicy::AbortBatch {
                            report.skipped = events.len() - index - 1;
                            warn!(skipped = report.skipped, "Aborting remaining events of delivery");
                            break;
                        }
                    }
                }
            }

            report
        }
        .instrument(span)
        .await
    }
}

fn reply_token_of(reply_token: Option<&str>) -> Option<&str> {
    let reply_token = reply_token.filter(|token| !token.is_empty());
    if reply_token.is_none() {
        debug!("Event carries no reply token, ignoring");
    }
    reply_token
}

fn owner_of(source: &Source) -> Option<&str> {
    let owner_id = source.owner_id();
    if owner_id.is_none() {
        warn!(source = ?source, "Event source carries no usable identity, ignoring");
    }
    owner_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::database::{MemoryTodoStore, TodoStore};
    use crate::models::LineMessage;
    use crate::utils::errors::LineResult;
    use async_trait::async_trait;
    use serde_json::json;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<(String, Vec<LineMessage>)>>,
    }

    #[async_trait]
    impl ReplyTransport for RecordingTransport {
        async fn reply(&self, reply_token: &str, messages: &[LineMessage]) -> LineResult<()> {
            self.sent.lock().await.push((reply_token.to_string(), messages.to_vec()));
            Ok(())
        }
    }

    fn router(store: Arc<dyn TodoStore>, transport: Arc<RecordingTransport>, policy: FailurePolicy) -> EventRouter {
        router_with_format(store, transport, policy, TimestampFormat::EpochMillis)
    }

    fn router_with_format(
        store: Arc<dyn TodoStore>,
        transport: Arc<RecordingTransport>,
        policy: FailurePolicy,
        format: TimestampFormat,
    ) -> EventRouter {
        let i18n = Arc::new(I18n::new(&Settings::default().i18n));
        let commands = CommandHandler::new(store, i18n.clone(), "ja");
        EventRouter::new(commands, transport, i18n, "ja", format, policy)
    }

    fn text_event(owner_id: &str, timestamp: i64, text: &str) -> WebhookEvent {
        event(json!({
            "type": "message", "replyToken": format!("rt-{}", timestamp), "timestamp": timestamp,
            "source": { "type": "user", "userId": owner_id },
            "message": { "type": "text", "id": "1", "text": text }
        }))
    }

    fn event(value: serde_json::Value) -> WebhookEvent {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_text_message_uses_event_timestamp_as_key() {
        let store = Arc::new(MemoryTodoStore::new());
        let router = router(store.clone(), Arc::default(), FailurePolicy::Isolate);

        let routed = router
            .route(&event(json!({
                "type": "message", "replyToken": "rt", "timestamp": 100,
                "source": { "type": "group", "groupId": "C1", "userId": "U1" },
                "message": { "type": "text", "id": "1", "text": "Buy milk" }
            })))
            .await
            .unwrap();

        assert_eq!(routed, Some(RoutedReply {
            reply_token: "rt".to_string(),
            messages: vec![ReplyMessage::text("登録しました")],
        }));
        let stored = store.query_by_owner("C1").await.unwrap();
        assert_eq!(stored[0].created_at, "100");
    }

    #[tokio::test]
    async fn test_non_text_and_unknown_events_are_ignored() {
        let store = Arc::new(MemoryTodoStore::new());
        let transport = Arc::new(RecordingTransport::default());
        let router = router(store.clone(), transport.clone(), FailurePolicy::Isolate);

        let events = vec![
            event(json!({
                "type": "message", "replyToken": "rt", "timestamp": 100,
                "source": { "type": "user", "userId": "U1" },
                "message": { "type": "sticker", "id": "1", "packageId": "1", "stickerId": "1" }
            })),
            event(json!({ "type": "unfollow", "timestamp": 100, "source": { "type": "user", "userId": "U1" } })),
            event(json!({
                "type": "postback", "replyToken": "rt", "timestamp": 100,
                "source": { "type": "user", "userId": "" },
                "postback": { "data": "100" }
            })),
        ];

        let report = router.dispatch(&events).await;

        assert_eq!(report, DispatchReport { ignored: 3, ..Default::default() });
        assert!(transport.sent.lock().await.is_empty());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_datetime_keys_keep_tasks_created_in_the_same_second() {
        let store = Arc::new(MemoryTodoStore::new());
        let transport = Arc::new(RecordingTransport::default());
        let router = router_with_format(store.clone(), transport.clone(), FailurePolicy::Isolate, TimestampFormat::Datetime);

        let report = router
            .dispatch(&[text_event("U1", 1000, "Buy milk"), text_event("U1", 1500, "Walk dog")])
            .await;

        assert_eq!(report, DispatchReport { replied: 2, ..Default::default() });
        let stored: Vec<(String, String)> = store
            .query_by_owner("U1")
            .await
            .unwrap()
            .into_iter()
            .map(|item| (item.created_at, item.text))
            .collect();
        assert_eq!(stored, vec![
            ("1970-01-01 00:00:01.000".to_string(), "Buy milk".to_string()),
            ("1970-01-01 00:00:01.500".to_string(), "Walk dog".to_string()),
        ]);
    }

    #[tokio::test]
    async fn test_events_without_reply_token_are_ignored() {
        let store = Arc::new(MemoryTodoStore::new());
        let transport = Arc::new(RecordingTransport::default());
        let router = router(store.clone(), transport.clone(), FailurePolicy::Isolate);

        let events = vec![
            event(json!({
                "type": "message", "mode": "standby", "timestamp": 100,
                "source": { "type": "user", "userId": "U1" },
                "message": { "type": "text", "id": "1", "text": "Buy milk" }
            })),
            event(json!({
                "type": "postback", "mode": "standby", "timestamp": 200,
                "source": { "type": "user", "userId": "U1" },
                "postback": { "data": "100" }
            })),
            event(json!({
                "type": "follow", "replyToken": "rt-follow", "timestamp": 300,
                "source": { "type": "user", "userId": "U1" }
            })),
        ];

        let report = router.dispatch(&events).await;

        assert_eq!(report, DispatchReport { replied: 1, ignored: 2, ..Default::default() });
        assert!(store.is_empty().await);
        let sent = transport.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "rt-follow");
    }

    #[test]
    fn test_failure_policy_from_flag() {
        assert_eq!(FailurePolicy::from_isolation_flag(true), FailurePolicy::Isolate);
        assert_eq!(FailurePolicy::from_isolation_flag(false), FailurePolicy::AbortBatch);
    }
}
