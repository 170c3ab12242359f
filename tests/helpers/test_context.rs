//! Test context for unified test setup
//!
//! This module provides a unified test context that wires the recording
//! store and the mock LINE API into the real services.

use std::sync::Arc;
use TodoBuddy::config::{Settings, StorageBackend};
use TodoBuddy::handlers::EventRouter;
use TodoBuddy::i18n::I18n;
use TodoBuddy::middleware::SignatureVerifier;
use TodoBuddy::server::{self, AppState};
use TodoBuddy::services::ServiceFactory;

use super::line_mock::{LineMockServer, MockResponseConfig, TEST_ACCESS_TOKEN};
use super::recording_store::RecordingStore;

pub const TEST_CHANNEL_SECRET: &str = "test-channel-secret";

/// Test context configuration
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub isolate_event_failures: bool,
    pub reply_status: u16,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            isolate_event_failures: true,
            reply_status: 200,
        }
    }
}

/// Unified test context that manages all test components
pub struct TestContext {
    pub store: Arc<RecordingStore>,
    pub line_mock: LineMockServer,
    pub settings: Settings,
    pub services: ServiceFactory,
}

impl TestContext {
    /// Create a new test context with all components initialized
    pub async fn new() -> Self {
        Self::new_with_config(TestConfig::default()).await
    }

    /// Create a new test context with custom configuration
    pub async fn new_with_config(config: TestConfig) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let line_mock = LineMockServer::new().await;
        line_mock
            .mock_reply(MockResponseConfig {
                status: config.reply_status,
                ..Default::default()
            })
            .await;

        let settings = Self::create_test_settings(&line_mock, &config);
        let store = Arc::new(RecordingStore::new());
        let i18n = I18n::new(&settings.i18n);
        let services = ServiceFactory::new(settings.clone(), store.clone(), i18n)
            .expect("services should build");

        Self {
            store,
            line_mock,
            settings,
            services,
        }
    }

    fn create_test_settings(line_mock: &LineMockServer, config: &TestConfig) -> Settings {
        let mut settings = Settings::default();
        settings.line.channel_secret = TEST_CHANNEL_SECRET.to_string();
        settings.line.channel_access_token = TEST_ACCESS_TOKEN.to_string();
        settings.line.api_base_url = line_mock.base_url();
        settings.line.timeout_seconds = 2;
        settings.storage.backend = StorageBackend::Memory;
        settings.features.isolate_event_failures = config.isolate_event_failures;
        settings
    }

    pub fn router(&self) -> EventRouter {
        self.services.event_router()
    }

    /// The axum application as served in production
    pub fn app(&self) -> axum::Router {
        server::app(AppState::new(self.router(), self.verifier()))
    }

    pub fn verifier(&self) -> SignatureVerifier {
        SignatureVerifier::new(TEST_CHANNEL_SECRET)
    }
}
