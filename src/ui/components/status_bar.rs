use crate::app::AppState;
use peer_forms::form::FormMode;
use peer_settings::SettingTarget;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn render<C: SettingTarget>(f: &mut Frame, state: &AppState<C>, area: Rect) {
    if let Some((message, time)) = &state.status_message
        && time.elapsed().as_secs() <= 3
    {
        render_status_message(f, message, area);
        return;
    }

    let session = &state.session;
    let mode = session.mode();
    let edits_indicator = match session.edit_count() {
        0 => String::new(),
        1 => " [1 edit]".to_string(),
        n => format!(" [{} edits]", n),
    };
    let secrets_indicator = if state.mask_secrets {
        ""
    } else {
        " [secrets shown]"
    };

    let left_content = format!(
        " {} | {} | field {}/{}{}{}",
        mode,
        session.schema().title,
        session.selected() + 1,
        session.schema().len(),
        edits_indicator,
        secrets_indicator
    );

    let nav_hint = match mode {
        FormMode::Navigate => "? help  s save  q quit",
        FormMode::Edit => "Enter done  Ctrl-S save",
    };
    let version_text = format!("v{VERSION}");

    let used = left_content.width() + nav_hint.width() + version_text.width() + 3;
    let padding = (area.width as usize).saturating_sub(used);

    let base_style = Style::default()
        .fg(state.theme.status_bar_fg)
        .bg(state.theme.status_bar_bg);
    let style = match mode {
        FormMode::Edit => base_style
            .bg(state.theme.edit_mode_bg)
            .add_modifier(Modifier::BOLD),
        FormMode::Navigate => base_style,
    };

    let status_line = format!(
        "{} {} {:>padding$}{} ",
        left_content,
        nav_hint,
        "",
        version_text,
        padding = padding
    );

    let status = Paragraph::new(Line::from(vec![Span::styled(status_line, style)]));
    f.render_widget(status, area);
}

fn render_status_message(f: &mut Frame, message: &str, area: Rect) {
    let display_message = format!(" {message} ");

    let style = Style::default()
        .fg(Color::White)
        .bg(Color::Rgb(0, 100, 0))
        .add_modifier(Modifier::BOLD);

    let padding = (area.width as usize).saturating_sub(display_message.width());
    let status_line = format!("{}{:padding$}", display_message, "", padding = padding);

    let status = Paragraph::new(Line::from(vec![Span::styled(status_line, style)]));
    f.render_widget(status, area);
}
