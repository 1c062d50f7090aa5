//! Main TUI runner - entry point and event loop

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use dbtc_api::{ApiClient, Backend};
use dbtc_app::config::{self, CONFIG_FILENAME};
use dbtc_app::message::Message;
use dbtc_app::process::process_message;
use dbtc_app::project_form::ProjectForm;
use dbtc_app::signals;
use dbtc_app::state::AppState;
use dbtc_core::prelude::*;
use dbtc_core::ProjectSettings;
use tokio::sync::mpsc;

use super::{event, render, terminal};

/// Command-line overrides applied on top of the config files
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Replaces `[backend] url` from config.toml
    pub backend_url: Option<String>,
    pub config_dir: Option<PathBuf>,
    /// Prefills the project path when no project is configured yet
    pub project: Option<String>,
}

/// Load configuration, take over the terminal and run until the user quits
pub async fn run(options: RunOptions) -> Result<()> {
    let config_dir = config::config_dir(options.config_dir.as_deref());
    let mut settings = config::load_settings(&config_dir);

    if !config_dir.join(CONFIG_FILENAME).exists() {
        if let Err(e) = config::save_settings(&config_dir, &settings) {
            warn!("Could not write default {}: {}", CONFIG_FILENAME, e);
        }
    }

    if let Some(url) = options.backend_url {
        settings.backend.url = url;
    }
    info!(
        "Backend {} (timeout {}s), config dir {:?}",
        settings.backend.url, settings.backend.timeout_secs, config_dir
    );

    let client = ApiClient::new(
        &settings.backend.url,
        Duration::from_secs(settings.backend.timeout_secs),
    )?;
    let backend = Arc::new(client);

    let project = config::load_project_settings(&config_dir);
    let mut state = AppState::new(config_dir, settings, project);
    if let Some(path) = options.project.filter(|_| !state.is_configured()) {
        state.project_form = ProjectForm::from_settings(&ProjectSettings::new(path, "", ""));
    }

    terminal::install_panic_hook();
    let mut term = ratatui::init();

    let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
    signals::spawn_signal_handler(msg_tx.clone());

    process_message(&mut state, Message::Startup, &msg_tx, &backend);

    let result = run_loop(&mut term, &mut state, msg_rx, msg_tx, &backend);

    ratatui::restore();

    if let Err(e) = &result {
        error!("Event loop failed: {}", e);
    }
    result
}

/// Main event loop
fn run_loop<B>(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    mut msg_rx: mpsc::Receiver<Message>,
    msg_tx: mpsc::Sender<Message>,
    backend: &Arc<B>,
) -> Result<()>
where
    B: Backend + Sync + 'static,
{
    while !state.should_quit() {
        // Results of background requests and signals
        while let Ok(msg) = msg_rx.try_recv() {
            process_message(state, msg, &msg_tx, backend);
        }

        terminal.draw(|frame| render::view(frame, state))?;

        if let Some(message) = event::poll()? {
            process_message(state, message, &msg_tx, backend);
        }
    }

    info!("Shutting down");
    Ok(())
}
