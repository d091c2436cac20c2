pub mod components;
pub mod theme;

use crate::app::{event::handle_key_event, AppState};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use peer_settings::SettingTarget;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::time::Duration;

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = disable_raw_mode();
        let _ = execute!(stdout, LeaveAlternateScreen);
        let _ = stdout.flush();
    }
}

/// Run the form until it is submitted or cancelled. Returns the submitted
/// record, or `None` when the user backed out.
pub fn run_form<C: SettingTarget>(mut state: AppState<C>) -> Result<Option<C>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut state);
    terminal.show_cursor()?;
    result?;

    Ok(state.session.into_submitted())
}

fn run_app<C: SettingTarget>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState<C>,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            components::render(f, state);
        })?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            handle_key_event(key, state)?;
        }

        state.clear_expired_status_message();

        if state.should_quit() {
            break;
        }
    }

    Ok(())
}
