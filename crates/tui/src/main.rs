mod app;

use anyhow::Result;
use std::fs::{self, OpenOptions};

use tracing_subscriber::{prelude::*, EnvFilter};
use elimtui_core::{
    backup::{read_snapshot, BackupManager},
    config::{self, AppConfig},
    TournamentStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;

    let mut store = TournamentStore::new();
    let state_path = config.state_path();
    if state_path.exists() {
        match read_snapshot(&state_path) {
            Ok(snapshot) => store.restore(snapshot),
            Err(err) => {
                tracing::warn!("Ignoring unreadable autosave {}: {err}", state_path.display());
            }
        }
    }

    let backups = BackupManager::new(config.backup_root());
    let mut app = app::ElimtuiApp::new(config, store, backups);
    app.run().await
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("elimtui.log");

    let env_filter = EnvFilter::from_default_env();

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .compact()
        .with_writer(move || {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .expect("failed to open log file")
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
