mod config;
mod controller;
mod devices;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use config::AppConfig;
use controller::AppController;
use devices::Devices;
use model::{AppModel, SpotRepository, ToastQueue};
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = match logging::init_logging() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!("=== Hidden Spots starting ===");

    let config = AppConfig::load().context("failed to read hidden-spots.toml")?;
    tracing::debug!(?config, "Configuration loaded");

    let repository = match &config.dataset_path {
        Some(path) => SpotRepository::from_json_file(path)
            .with_context(|| format!("failed to load spot dataset from {path}"))?,
        None => SpotRepository::gwalior(),
    };
    tracing::info!(spots = repository.len(), city = %config.city, "Spot dataset ready");

    let model = Arc::new(AppModel::new(
        repository,
        config.city.clone(),
        ToastQueue::new(config.toast_duration()),
        config.flow_timeout(),
    ));
    let devices = Devices::simulated(&config.simulation);
    let controller = AppController::new(model.clone(), devices, config.refresh_delay());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Hidden Spots shutting down");
    res
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<AppModel>,
    controller: AppController,
) -> Result<()> {
    loop {
        let ui_state = model.get_ui_state().await;
        let discovery = model.get_discovery_view().await;
        let form = model.get_form_view().await;
        let profile = model.get_profile_view().await;
        let toast = model.toasts.current().await;
        let detail_spot = ui_state.detail.as_ref().and_then(|d| model.spot(&d.spot_id));

        terminal.draw(|f| {
            AppView::render(f, &ui_state, &discovery, &form, &profile, detail_spot.as_ref(), toast.as_ref());
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }

        if model.should_quit().await {
            break;
        }
    }

    Ok(())
}
