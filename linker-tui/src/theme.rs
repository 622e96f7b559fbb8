//! Colour palette and row styling.

use crate::notifications::NotificationLevel;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Palette {
    pub bg: Color,
    pub bg_highlight: Color,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(10, 10, 10),
            bg_highlight: Color::Rgb(42, 42, 42),
            primary: Color::Rgb(0, 255, 255),
            secondary: Color::Rgb(255, 0, 255),
            accent: Color::Rgb(255, 255, 0),
            success: Color::Rgb(0, 255, 0),
            warning: Color::Rgb(255, 255, 0),
            error: Color::Rgb(255, 0, 0),
            info: Color::Rgb(0, 255, 255),
            text: Color::Rgb(255, 255, 255),
            text_dim: Color::Rgb(136, 136, 136),
            border: Color::Rgb(68, 68, 68),
            border_focus: Color::Rgb(0, 255, 255),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

pub fn notification_color(level: NotificationLevel, palette: &Palette) -> Color {
    match level {
        NotificationLevel::Info => palette.info,
        NotificationLevel::Warning => palette.warning,
        NotificationLevel::Error => palette.error,
        NotificationLevel::Success => palette.success,
    }
}

/// Style for one list row. Selection wins over highlighting.
pub fn row_style(selected: bool, highlighted: bool, palette: &Palette) -> Style {
    if selected {
        Style::default()
            .fg(palette.secondary)
            .add_modifier(Modifier::BOLD)
    } else if highlighted {
        Style::default().fg(palette.accent).bg(palette.bg_highlight)
    } else {
        Style::default().fg(palette.text)
    }
}

pub fn border_style(focused: bool, palette: &Palette) -> Style {
    Style::default().fg(if focused {
        palette.border_focus
    } else {
        palette.border
    })
}
