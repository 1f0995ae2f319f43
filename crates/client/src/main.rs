//! Terminal client entry point.
mod app;
mod input;
mod logging;
mod presentation;

use anyhow::Result;
use app::CliApp;
use mathgame_runtime::RuntimeConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = RuntimeConfig::from_env();

    let _guard = logging::setup_logging()?;

    CliApp::start(config).await?.run().await
}
