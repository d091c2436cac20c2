use peer_forms::config::Config;
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub label: Color,
    pub placeholder: Color,
    pub optional: Color,
    pub link: Color,
    pub cursor_bg: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub edit_mode_bg: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::White,
            label: Color::Cyan,
            placeholder: Color::DarkGray,
            optional: Color::Gray,
            link: Color::Rgb(100, 150, 255),
            cursor_bg: Color::Yellow,
            status_bar_bg: Color::Rgb(40, 40, 40),
            status_bar_fg: Color::White,
            edit_mode_bg: Color::Rgb(0, 90, 140),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Black,
            ..Self::default_theme()
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::White,
            foreground: Color::Black,
            label: Color::Blue,
            placeholder: Color::Gray,
            optional: Color::DarkGray,
            link: Color::Rgb(50, 100, 200), // Darker blue for light theme
            cursor_bg: Color::Rgb(180, 130, 0),
            status_bar_bg: Color::LightBlue,
            status_bar_fg: Color::Black,
            edit_mode_bg: Color::Rgb(120, 180, 230),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        match config.theme.as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            _ => Self::default_theme(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
