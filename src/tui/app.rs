//! TUI application runner.
//!
//! Handles the event loop and terminal setup/teardown.

use std::io::{self, stdout};

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::{draw, handle_events};
use crate::app::Outcome;
use crate::core::{Error, SelectionResult};
use crate::App;

/// Run the interactive selector until a command is chosen or the user backs
/// out.
///
/// A canceled session returns [`Error::SelectionCanceled`].
pub fn run_tui(mut app: App) -> Result<SelectionResult> {
    setup_terminal()?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run_main_loop(&mut terminal, &mut app);

    restore_terminal()?;
    result?;

    match app.outcome {
        Some(Outcome::Selected(selection)) => Ok(selection),
        Some(Outcome::Canceled) | None => Err(Error::SelectionCanceled.into()),
    }
}

/// Setup the terminal for TUI mode.
fn setup_terminal() -> Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    // Restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    Ok(())
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Draw, block on one event, apply it, repeat.
fn run_main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    while !app.is_done() {
        terminal.draw(|frame| draw(frame, app))?;

        if let Event::Key(key) = event::read()? {
            handle_events(key, app);
        }
    }

    Ok(())
}
