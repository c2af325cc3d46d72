//! S3 File Manager
//!
//! Terminal client for an object-storage backend: browse buckets and
//! virtual folders, select entries and run bulk copy/move/delete/upload.

mod shell;

use std::rc::Rc;

use anyhow::{Context, Result};
use tokio::task::LocalSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use s3_filemanager::api::HttpClient;
use s3_filemanager::app::App;
use s3_filemanager::notify::Notifier;
use s3_filemanager::settings::{Settings, SERVER_URL_ENV};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging; stderr keeps log lines out of the rendered view
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "s3_filemanager=info".into()),
        )
        .init();

    tracing::info!("Starting S3 File Manager v{}", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load()
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            Settings::default()
        })
        .with_overrides(std::env::var(SERVER_URL_ENV).ok(), std::env::args().nth(1));

    let api = HttpClient::new(&settings.server_url)
        .with_context(|| format!("Cannot use server URL {}", settings.server_url))?;
    tracing::info!("Using backend at {}", api.base_url());

    let lines = shell::spawn_stdin_reader();
    let confirm = Rc::new(shell::TerminalConfirm::new(lines.clone()));
    let app = App::new(api, Notifier::with_ttl(settings.banner_ttl()), confirm);

    LocalSet::new().run_until(shell::run(app, lines)).await
}
