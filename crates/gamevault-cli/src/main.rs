//! GameVault console front end
//!
//! Opens the configured game store and runs the text menu on stdin/stdout.
//!
//! Usage: `gamevault [CONFIG_FILE]`. Without an argument the configuration is
//! looked up in the default locations.

mod menu;

use anyhow::{Context, Result};
use gamevault_config::CatalogConfig;
use gamevault_library::open_store;
use menu::Menu;
use std::io;
use std::path::PathBuf;
use tracing::info;

fn main() -> Result<()> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => CatalogConfig::load(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => CatalogConfig::load_default().context("Failed to load configuration")?,
    };

    setup_logging(&config.log_level);
    info!("GameVault starting with {:?} storage", config.storage.backend);

    let mut store = open_store(&config.storage).context("Failed to open game store")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(store.as_mut(), stdin.lock(), stdout.lock()).run()?;

    info!("GameVault exiting");
    Ok(())
}

/// Log to stderr so the menu on stdout stays readable
fn setup_logging(default_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}
