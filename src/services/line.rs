//! LINE Messaging API client
//!
//! Sends rendered replies through the reply endpoint. Failures are mapped to
//! `LineError` and never retried here.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use crate::config::LineConfig;
use crate::models::{LineMessage, ReplyMessageRequest};
use crate::utils::errors::{LineError, LineResult};
use crate::utils::logging::log_api_error;

const REPLY_PATH: &str = "/v2/bot/message/reply";

/// Delivers replies to the conversation that produced a reply token
#[async_trait]
pub trait ReplyTransport: Send + Sync {
    async fn reply(&self, reply_token: &str, messages: &[LineMessage]) -> LineResult<()>;
}

#[derive(Clone)]
pub struct LineClient {
    client: Client,
    api_base_url: String,
    channel_access_token: String,
}

impl std::fmt::Debug for LineClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineClient")
            .field("api_base_url", &self.api_base_url)
            .finish_non_exhaustive()
    }
}

impl LineClient {
    /// Create a new LineClient instance
    pub fn new(config: &LineConfig) -> LineResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("TodoBuddy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LineError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            channel_access_token: config.channel_access_token.clone(),
        })
    }
}

#[async_trait]
impl ReplyTransport for LineClient {
    async fn reply(&self, reply_token: &str, messages: &[LineMessage]) -> LineResult<()> {
        let url = format!("{}{}", self.api_base_url, REPLY_PATH);
        debug!(url = %url, count = messages.len(), "Sending LINE reply");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.channel_access_token)
            .json(&ReplyMessageRequest { reply_token, messages })
            .send()
            .await
            .map_err(|e| {
                log_api_error("line.reply", &e.to_string(), None);
                if e.is_timeout() {
                    LineError::Timeout
                } else if e.is_connect() {
                    LineError::ServiceUnavailable
                } else {
                    LineError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log_api_error("line.reply", &format!("HTTP {}", status), Some(&body));
            return Err(LineError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
