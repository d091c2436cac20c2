use super::state::AppState;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use peer_forms::form::FormMode;
use peer_settings::SettingTarget;

pub fn handle_key_event<C: SettingTarget>(key: KeyEvent, state: &mut AppState<C>) -> Result<()> {
    if state.show_help {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
        ) {
            state.show_help = false;
        }
        return Ok(());
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('s') => {
                state.session.submit();
                return Ok(());
            }
            KeyCode::Char('c') => {
                state.session.cancel();
                return Ok(());
            }
            KeyCode::Char('u') => {
                state.session.clear_field();
                return Ok(());
            }
            _ => {}
        }
    }

    match state.session.mode() {
        FormMode::Navigate => handle_navigate_mode(key, state),
        FormMode::Edit => handle_edit_mode(key, state),
    }
}

fn handle_navigate_mode<C: SettingTarget>(key: KeyEvent, state: &mut AppState<C>) -> Result<()> {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => state.session.select_next(),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => state.session.select_prev(),
        KeyCode::Enter | KeyCode::Char('i') | KeyCode::Char('e') => state.session.begin_edit(),
        KeyCode::Char('s') => state.session.submit(),
        KeyCode::Char('q') | KeyCode::Esc => state.session.cancel(),
        KeyCode::Char('m') => state.toggle_mask(),
        KeyCode::Char('?') => state.show_help = true,
        KeyCode::Char('o') => open_selected_link(state),
        _ => {}
    }
    Ok(())
}

fn handle_edit_mode<C: SettingTarget>(key: KeyEvent, state: &mut AppState<C>) -> Result<()> {
    let session = &mut state.session;
    match key.code {
        KeyCode::Esc | KeyCode::Enter => session.end_edit(),
        KeyCode::Tab | KeyCode::Down => {
            session.select_next();
            session.begin_edit();
        }
        KeyCode::BackTab | KeyCode::Up => {
            session.select_prev();
            session.begin_edit();
        }
        KeyCode::Backspace => session.backspace(),
        KeyCode::Delete => session.delete(),
        KeyCode::Left => session.move_cursor_left(),
        KeyCode::Right => session.move_cursor_right(),
        KeyCode::Home => session.move_cursor_home(),
        KeyCode::End => session.move_cursor_end(),
        KeyCode::Char(c) => session.insert_char(c),
        _ => {}
    }
    Ok(())
}

fn open_selected_link<C: SettingTarget>(state: &mut AppState<C>) {
    let Some(link) = state.selected_link() else {
        state.set_status_message("No help link for this field".to_string());
        return;
    };

    match open::that(link) {
        Ok(()) => state.set_status_message(format!("Opened {}", link)),
        Err(e) => {
            tracing::warn!("Failed to open {}: {}", link, e);
            state.set_status_message(format!("Could not open {}", link));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::Theme;
    use peer_forms::form::{FormOutcome, FormSession};
    use peer_settings::{NumericValue, PostgresConfig, SshConfig};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn state<C: SettingTarget>() -> AppState<C> {
        AppState::new(FormSession::new(), Theme::default(), true)
    }

    fn press<C: SettingTarget>(state: &mut AppState<C>, codes: &[KeyCode]) {
        for code in codes {
            handle_key_event(key(*code), state).unwrap();
        }
    }

    #[test]
    fn test_typing_edits_selected_field() {
        let mut state: AppState<SshConfig> = state();
        press(
            &mut state,
            &[
                KeyCode::Enter,
                KeyCode::Char('j'),
                KeyCode::Char('u'),
                KeyCode::Char('m'),
                KeyCode::Char('p'),
                KeyCode::Esc,
            ],
        );
        // 'j' and 'm' are text while editing, not navigation
        assert_eq!(state.session.config().host, "jump");
        assert!(state.mask_secrets);
    }

    #[test]
    fn test_tab_moves_to_next_field_in_edit_mode() {
        let mut state: AppState<PostgresConfig> = state();
        press(
            &mut state,
            &[
                KeyCode::Enter,
                KeyCode::Char('h'),
                KeyCode::Tab,
                KeyCode::Backspace,
                KeyCode::Backspace,
                KeyCode::Char('3'),
                KeyCode::Char('3'),
            ],
        );
        assert_eq!(state.session.config().host, "h");
        assert_eq!(state.session.config().port, NumericValue::Int(5433));
        assert_eq!(state.session.mode(), FormMode::Edit);
    }

    #[test]
    fn test_ctrl_s_submits_from_edit_mode() {
        let mut state: AppState<SshConfig> = state();
        press(&mut state, &[KeyCode::Enter, KeyCode::Char('x')]);
        handle_key_event(ctrl('s'), &mut state).unwrap();

        assert_eq!(state.session.outcome(), Some(FormOutcome::Submitted));
        assert!(state.should_quit());
    }

    #[test]
    fn test_q_cancels_in_navigate_mode() {
        let mut state: AppState<SshConfig> = state();
        press(&mut state, &[KeyCode::Char('q')]);
        assert_eq!(state.session.outcome(), Some(FormOutcome::Cancelled));
    }

    #[test]
    fn test_help_swallows_keys() {
        let mut state: AppState<SshConfig> = state();
        press(&mut state, &[KeyCode::Char('?'), KeyCode::Char('j')]);
        assert!(state.show_help);
        assert_eq!(state.session.selected(), 0);

        press(&mut state, &[KeyCode::Esc]);
        assert!(!state.show_help);
        assert!(!state.should_quit());
    }

    #[test]
    fn test_ctrl_u_clears_field() {
        let mut state: AppState<PostgresConfig> = state();
        press(&mut state, &[KeyCode::Char('j'), KeyCode::Enter]);
        handle_key_event(ctrl('u'), &mut state).unwrap();
        assert!(state.session.config().port.is_nan());
    }

    #[test]
    fn test_open_without_link_sets_message() {
        let mut state: AppState<SshConfig> = state();
        press(&mut state, &[KeyCode::Char('o')]);
        assert_eq!(
            state.status_message.as_ref().unwrap().0,
            "No help link for this field"
        );
    }
}
