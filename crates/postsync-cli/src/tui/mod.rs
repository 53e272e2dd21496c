//! postsync TUI
//!
//! Terminal client for the remote post collection.
//!
//! ## Layout
//!
//! - Left: the loaded posts
//! - Right: detail of the selected post, or the create/edit form
//!
//! While loading only a loading line is shown, and an error replaces the
//! whole view until it is dismissed or a reload succeeds.
//!
//! ## Keys
//!
//! - j/k or ↑/↓: Move selection
//! - n: New post
//! - e/Enter: Edit selected post
//! - d: Delete selected post (asks y/n)
//! - r: Reload
//! - ?: Help
//! - q/Ctrl-C: Quit
//!
//! In the form, Tab switches field, Enter submits and Esc cancels.

mod app;
mod ui;

use std::io::stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing::info;

use postsync_core::{Config, Gateway, HttpGateway, SyncController};

use app::{App, Intent};

use crate::logging::init_tui_logging;

/// Run the TUI application
pub async fn run(config: Config) -> Result<()> {
    init_tui_logging(&config);
    info!("Starting TUI against {}", config.api_url);

    let controller = SyncController::from_config(HttpGateway::new(&config.api_url), &config);
    let mut app = App::new(controller);

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    let result = match Terminal::new(CrosstermBackend::new(stdout())) {
        Ok(mut terminal) => run_app(&mut terminal, &mut app).await,
        Err(e) => Err(e.into()),
    };

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_app<B: Backend, G: Gateway>(
    terminal: &mut Terminal<B>,
    app: &mut App<G>,
) -> Result<()> {
    // Show the loading view, then fetch the first page
    terminal.draw(|frame| ui::draw(frame, app))?;
    app.perform(Intent::Reload).await;

    loop {
        app.check_status_timeout();

        terminal.draw(|frame| ui::draw(frame, app))?;

        tokio::time::sleep(Duration::from_millis(50)).await;

        if event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if let Some(intent) = app.handle_key(key) {
                    app.busy = true;
                    terminal.draw(|frame| ui::draw(frame, app))?;

                    app.perform(intent).await;
                    app.busy = false;
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    info!("TUI exiting");
    Ok(())
}
