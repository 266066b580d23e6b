//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use tracing::info;

use crate::api::ExpenseApi;
use crate::config::Settings;
use crate::error::TallyError;

use super::app::App;
use super::event::EventHandler;
use super::handler::handle_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the interactive dashboard until the user quits
pub fn run_tui(api: &dyn ExpenseApi, settings: &Settings) -> Result<()> {
    let mut terminal = init_terminal()?;
    let result = run_loop(&mut terminal, api, settings);
    restore_terminal()?;
    result
}

fn run_loop(terminal: &mut Tui, api: &dyn ExpenseApi, settings: &Settings) -> Result<()> {
    let mut app = App::new(api, settings);

    // Draw once so the user sees the frame while the first load runs
    terminal.draw(|frame| super::views::render(frame, &app))?;
    app.start();
    info!("dashboard started");

    let events = EventHandler::default();

    loop {
        terminal.draw(|frame| super::views::render(frame, &app))?;

        let event = events
            .next()
            .map_err(|_| TallyError::Tui("terminal event reader stopped".into()))?;
        handle_event(&mut app, event)?;

        if app.should_quit {
            break;
        }
    }

    info!("dashboard closed");
    Ok(())
}
