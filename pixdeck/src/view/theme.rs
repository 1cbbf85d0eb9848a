//! src/view/theme.rs
//! ============================================================================
//! # Catppuccin Mocha Theme Color Palette
//!
//! Color constants for the Catppuccin Mocha theme plus the handful of
//! composite styles the components share.
//! https://github.com/catppuccin/catppuccin

use ratatui::style::{Color, Modifier, Style};
use tracing::{debug, instrument};

/// Logs the palette once at startup
#[instrument(level = "debug")]
pub fn init_theme() {
    debug!("Initializing Catppuccin Mocha theme");
    debug!("Background: {:?}", BACKGROUND);
    debug!("Foreground: {:?}", FOREGROUND);
    debug!("Current line: {:?}", CURRENT_LINE);
}

pub const BACKGROUND: Color = Color::Rgb(30, 30, 46); // Base
pub const CURRENT_LINE: Color = Color::Rgb(69, 71, 90); // Surface1
pub const FOREGROUND: Color = Color::Rgb(205, 214, 244); // Text
pub const COMMENT: Color = Color::Rgb(127, 132, 156); // Overlay1
pub const CYAN: Color = Color::Rgb(137, 220, 235); // Sky
pub const GREEN: Color = Color::Rgb(166, 227, 161); // Green
pub const ORANGE: Color = Color::Rgb(250, 179, 135); // Peach
pub const PINK: Color = Color::Rgb(245, 194, 231); // Pink
pub const PURPLE: Color = Color::Rgb(203, 166, 247); // Mauve
pub const RED: Color = Color::Rgb(243, 139, 168); // Red
pub const YELLOW: Color = Color::Rgb(249, 226, 175); // Yellow

pub fn base_style() -> Style {
    Style::default().bg(BACKGROUND).fg(FOREGROUND)
}

/// Border of the pane that has keyboard focus
pub fn focused_border_style() -> Style {
    Style::default().fg(CYAN)
}

pub fn border_style() -> Style {
    Style::default().fg(COMMENT)
}

pub fn placeholder_style() -> Style {
    Style::default().fg(COMMENT).add_modifier(Modifier::ITALIC)
}

pub fn chip_style() -> Style {
    Style::default().bg(CURRENT_LINE).fg(FOREGROUND)
}

pub fn chip_active_style() -> Style {
    Style::default()
        .bg(PURPLE)
        .fg(BACKGROUND)
        .add_modifier(Modifier::BOLD)
}

pub fn skeleton_style() -> Style {
    Style::default().fg(CURRENT_LINE)
}

pub fn card_border_style(selected: bool) -> Style {
    if selected {
        Style::default().fg(PINK).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(CURRENT_LINE)
    }
}

pub fn highlight_style() -> Style {
    Style::default()
        .bg(CURRENT_LINE)
        .fg(YELLOW)
        .add_modifier(Modifier::BOLD)
}
