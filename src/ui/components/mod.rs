pub mod status_bar;

use crate::app::AppState;
use peer_forms::form::{mask_text, FormMode, TextInput};
use peer_settings::{FieldDescriptor, SettingTarget};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

const LABEL_WIDTH: usize = 22;

pub fn render<C: SettingTarget>(f: &mut Frame, state: &AppState<C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Fields
            Constraint::Length(5), // Tips
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_fields(f, state, chunks[0]);
    render_tips(f, state, chunks[1]);
    status_bar::render(f, state, chunks[2]);

    if state.show_help {
        render_help_overlay(f, state);
    }
}

fn render_fields<C: SettingTarget>(f: &mut Frame, state: &AppState<C>, area: Rect) {
    let session = &state.session;
    let theme = &state.theme;

    let items: Vec<ListItem> = session
        .schema()
        .iter()
        .enumerate()
        .map(|(i, descriptor)| {
            let selected = i == session.selected();
            let marker = if selected { "▶ " } else { "  " };
            let label = if descriptor.optional {
                format!("{} (optional)", descriptor.label)
            } else {
                descriptor.label.to_string()
            };

            let label_style = if selected {
                Style::default()
                    .fg(theme.label)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(theme.label)
            };

            let mut spans = vec![
                Span::raw(marker),
                Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), label_style),
                Span::raw(" "),
            ];

            match session.input() {
                Some(input) if selected && session.mode() == FormMode::Edit => {
                    let mask = state.mask_secrets && descriptor.input.is_masked();
                    spans.extend(input_spans(input, mask, state));
                }
                _ => spans.push(value_span(state, descriptor)),
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", session.schema().title))
                .style(Style::default().bg(theme.background)),
        )
        .style(Style::default().fg(theme.foreground));

    f.render_widget(list, area);
}

fn value_span<C: SettingTarget>(
    state: &AppState<C>,
    descriptor: &FieldDescriptor<C::Field>,
) -> Span<'static> {
    let value = state
        .session
        .display_value(descriptor, state.mask_secrets);

    if !value.is_empty() {
        return Span::styled(value, Style::default().fg(state.theme.foreground));
    }

    let placeholder = descriptor.placeholder().unwrap_or_default();
    Span::styled(
        placeholder,
        Style::default()
            .fg(state.theme.placeholder)
            .add_modifier(Modifier::ITALIC),
    )
}

fn input_spans<C: SettingTarget>(
    input: &TextInput,
    mask: bool,
    state: &AppState<C>,
) -> Vec<Span<'static>> {
    let (before, current, after) = input.split_at_cursor();
    let shown = |text: &str| {
        if mask {
            mask_text(text)
        } else {
            text.to_string()
        }
    };

    let cursor_char = match current {
        Some(c) => shown(&c.to_string()),
        None => "█".to_string(),
    };

    vec![
        Span::raw(shown(before)),
        Span::styled(
            cursor_char,
            Style::default().bg(state.theme.cursor_bg).fg(Color::Black),
        ),
        Span::raw(shown(after)),
    ]
}

fn render_tips<C: SettingTarget>(f: &mut Frame, state: &AppState<C>, area: Rect) {
    let mut lines: Vec<Line> = vec![];

    if let Some(descriptor) = state.session.selected_descriptor() {
        match descriptor.tips {
            Some(tips) => lines.push(Line::from(tips)),
            None => lines.push(Line::from(Span::styled(
                "No tips for this field",
                Style::default().fg(state.theme.placeholder),
            ))),
        }
        if let Some(link) = descriptor.helpful_link {
            lines.push(Line::from(vec![
                Span::styled("Docs: ", Style::default().fg(state.theme.optional)),
                Span::styled(
                    link,
                    Style::default()
                        .fg(state.theme.link)
                        .add_modifier(Modifier::UNDERLINED),
                ),
                Span::styled("  (o to open)", Style::default().fg(state.theme.optional)),
            ]));
        }
    }

    let tips = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Tips ")
                .style(Style::default().bg(state.theme.background)),
        )
        .style(Style::default().fg(state.theme.foreground))
        .wrap(Wrap { trim: true });

    f.render_widget(tips, area);
}

fn render_help_overlay<C: SettingTarget>(f: &mut Frame, state: &AppState<C>) {
    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(state.theme.foreground);
    let section_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let entry = |keys: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("    {:<16}", keys), key_style),
            Span::styled(desc, desc_style),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(
            "  Peer Form Help",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("  ── Navigate ──", section_style)),
        entry("j / ↓ / Tab", "Next field"),
        entry("k / ↑ / S-Tab", "Previous field"),
        entry("Enter / i", "Edit field"),
        entry("o", "Open the field's docs link"),
        entry("m", "Show or hide secrets"),
        entry("s / Ctrl-S", "Save and exit"),
        entry("q / Esc", "Exit without saving"),
        Line::from(""),
        Line::from(Span::styled("  ── Edit ──", section_style)),
        entry("Enter / Esc", "Stop editing"),
        entry("Tab / S-Tab", "Edit next or previous field"),
        entry("Ctrl-U", "Clear field"),
        entry("← → Home End", "Move cursor"),
        Line::from(""),
        entry("? / Esc", "Close help"),
    ];

    let area = centered_rect(60, 70, f.area());
    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .style(Style::default().bg(state.theme.background)),
    );

    f.render_widget(Clear, area);
    f.render_widget(help, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
