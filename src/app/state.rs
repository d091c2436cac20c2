use crate::ui::theme::Theme;
use peer_forms::form::FormSession;
use peer_settings::SettingTarget;
use std::time::Instant;

const STATUS_MESSAGE_SECS: u64 = 3;

pub struct AppState<C: SettingTarget> {
    pub session: FormSession<C>,
    pub theme: Theme,
    pub mask_secrets: bool,
    pub show_help: bool,
    pub status_message: Option<(String, Instant)>,
}

impl<C: SettingTarget> AppState<C> {
    pub fn new(session: FormSession<C>, theme: Theme, mask_secrets: bool) -> Self {
        Self {
            session,
            theme,
            mask_secrets,
            show_help: false,
            status_message: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.session.is_finished()
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    pub fn clear_expired_status_message(&mut self) {
        if let Some((_, time)) = &self.status_message
            && time.elapsed().as_secs() > STATUS_MESSAGE_SECS
        {
            self.status_message = None;
        }
    }

    pub fn toggle_mask(&mut self) {
        self.mask_secrets = !self.mask_secrets;
        let message = if self.mask_secrets {
            "Secrets hidden"
        } else {
            "Secrets shown"
        };
        self.set_status_message(message.to_string());
    }

    /// Help link of the selected field, if it has one.
    pub fn selected_link(&self) -> Option<&'static str> {
        self.session
            .selected_descriptor()
            .and_then(|d| d.helpful_link)
    }
}
