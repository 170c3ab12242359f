//! TodoBuddy LINE Bot
//!
//! Main application entry point

use std::path::Path;
use anyhow::Context;
use tracing::info;

use TodoBuddy::{
    config::Settings,
    utils::logging,
    database::connect_store,
    middleware::SignatureVerifier,
    server::{self, AppState},
    services::ServiceFactory,
    i18n::I18n,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", TodoBuddy::info());

    // One store client for the whole process
    let store = connect_store(&settings.storage).await?;
    info!(backend = store.name(), "Store ready");

    info!("Loading translations...");
    let mut i18n = I18n::new(&settings.i18n);
    if let Some(dir) = &settings.i18n.translations_dir {
        i18n.load_translations(Path::new(dir)).await?;
    }

    info!("Initializing services...");
    let services = ServiceFactory::new(settings.clone(), store, i18n)?;
    let state = AppState::new(
        services.event_router(),
        SignatureVerifier::new(settings.line.channel_secret.clone()),
    );

    server::serve(&settings.bind_addr(), state).await?;

    Ok(())
}
