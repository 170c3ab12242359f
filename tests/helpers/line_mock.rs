//! Mock LINE Messaging API server for testing
//!
//! Uses wiremock to accept reply requests and to inspect what the bot sent.

use serde::Deserialize;
use serde_json::json;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};
use TodoBuddy::models::LineMessage;

pub const TEST_ACCESS_TOKEN: &str = "test-channel-token";
pub const REPLY_PATH: &str = "/v2/bot/message/reply";

/// Mock LINE API server for testing
pub struct LineMockServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub status: u16,
    pub delay_ms: Option<u64>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            status: 200,
            delay_ms: None,
        }
    }
}

/// A reply request as received by the mock
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedReply {
    pub reply_token: String,
    pub messages: Vec<LineMessage>,
}

impl LineMockServer {
    /// Create a new mock LINE API server
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to configure as `line.api_base_url`
    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    /// Setup mock for the reply endpoint
    pub async fn mock_reply(&self, config: MockResponseConfig) {
        let body = if config.status < 400 {
            json!({})
        } else {
            json!({ "message": "Invalid reply token" })
        };

        let mut response = ResponseTemplate::new(config.status).set_body_json(body);
        if let Some(delay) = config.delay_ms {
            response = response.set_delay(std::time::Duration::from_millis(delay));
        }

        Mock::given(method("POST"))
            .and(path(REPLY_PATH))
            .and(header("authorization", format!("Bearer {}", TEST_ACCESS_TOKEN).as_str()))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// All reply requests received so far, in order
    pub async fn replies(&self) -> Vec<ReceivedReply> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == REPLY_PATH)
            .map(|request| request.body_json::<ReceivedReply>().expect("reply body should be JSON"))
            .collect()
    }

    /// Reset all mocks and recorded requests
    pub async fn reset(&self) {
        self.server.reset().await;
    }
}
