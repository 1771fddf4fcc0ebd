//! Centralized theming for the replydraft TUI
//!
//! This module provides a single source of truth for all colors and styles
//! used throughout the application.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;
use std::sync::RwLock;

use crate::config::ThemeVariant;

/// Global theme variant storage
static THEME_VARIANT: RwLock<ThemeVariant> = RwLock::new(ThemeVariant::Modern);

/// Initialize the theme variant (call once at startup).
///
/// The RGB palette of the modern theme renders badly without 24-bit color,
/// so it degrades to the dark theme on such terminals.
pub fn init_theme(variant: ThemeVariant) {
    let variant = if variant == ThemeVariant::Modern && !supports_true_color() {
        tracing::debug!("Terminal lacks true color, using dark theme");
        ThemeVariant::Dark
    } else {
        variant
    };
    if let Ok(mut guard) = THEME_VARIANT.write() {
        *guard = variant;
    }
}

/// Get the current theme variant
pub fn current_theme() -> ThemeVariant {
    THEME_VARIANT.read().map(|g| *g).unwrap_or_default()
}

/// Check if the terminal supports true color (24-bit RGB)
pub fn supports_true_color() -> bool {
    std::env::var("COLORTERM")
        .map(|v| v == "truecolor" || v == "24bit")
        .unwrap_or(false)
}

/// Catppuccin Mocha color palette for the Modern theme
mod catppuccin {
    use super::Color;

    // Background layers (darkest to lightest)
    pub const BASE: Color = Color::Rgb(30, 30, 46); // #1e1e2e - main background
    pub const MANTLE: Color = Color::Rgb(24, 24, 37); // #181825 - status bar
    pub const SURFACE0: Color = Color::Rgb(49, 50, 68); // #313244 - borders
    pub const SURFACE1: Color = Color::Rgb(69, 71, 90); // #45475a - selection

    // Text colors
    pub const TEXT: Color = Color::Rgb(205, 214, 244); // #cdd6f4 - primary
    pub const OVERLAY0: Color = Color::Rgb(108, 112, 134); // #6c7086 - muted

    // Accent colors
    pub const LAVENDER: Color = Color::Rgb(180, 190, 254); // #b4befe - focused borders
    pub const BLUE: Color = Color::Rgb(137, 180, 250); // #89b4fa - accent
    pub const GREEN: Color = Color::Rgb(166, 227, 161); // #a6e3a1 - checked boxes
    pub const YELLOW: Color = Color::Rgb(249, 226, 175); // #f9e2af - warnings, keys
    pub const RED: Color = Color::Rgb(243, 139, 168); // #f38ba8 - errors
    pub const CRUST: Color = Color::Rgb(17, 17, 27); // #11111b - text on bright bars
}

/// Border type helpers for different UI contexts
pub mod borders {
    use super::*;

    /// Border type for the focused field (rounded for the RGB theme)
    pub fn input_focused() -> BorderType {
        match current_theme() {
            ThemeVariant::Modern => BorderType::Rounded,
            ThemeVariant::Dark => BorderType::Plain,
            ThemeVariant::HighContrast => BorderType::Thick,
        }
    }

    /// Border type for unfocused panels
    pub fn panel() -> BorderType {
        match current_theme() {
            ThemeVariant::Modern => BorderType::Rounded,
            _ => BorderType::Plain,
        }
    }
}

/// Color palette - colors that vary by theme
pub mod colors {
    use super::*;

    pub fn bg_selection() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::SURFACE1,
            ThemeVariant::Dark => Color::Blue,
            ThemeVariant::HighContrast => Color::White,
        }
    }

    pub fn fg_selection() -> Color {
        match current_theme() {
            ThemeVariant::HighContrast => Color::Black,
            ThemeVariant::Modern => catppuccin::TEXT,
            ThemeVariant::Dark => Color::White,
        }
    }

    pub fn bg_status() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::MANTLE,
            ThemeVariant::Dark => Color::DarkGray,
            ThemeVariant::HighContrast => Color::Black,
        }
    }

    pub fn bg_error() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::RED,
            _ => Color::Red,
        }
    }

    pub fn bg_warning() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::YELLOW,
            ThemeVariant::Dark => Color::Yellow,
            ThemeVariant::HighContrast => Color::LightYellow,
        }
    }

    /// Text drawn on the bright error/warning bars
    pub fn fg_on_alert() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::CRUST,
            _ => Color::Black,
        }
    }

    pub fn fg_primary() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::TEXT,
            _ => Color::White,
        }
    }

    pub fn fg_muted() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::OVERLAY0,
            ThemeVariant::Dark => Color::DarkGray,
            ThemeVariant::HighContrast => Color::Gray,
        }
    }

    pub fn fg_accent() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::BLUE,
            ThemeVariant::Dark => Color::Cyan,
            ThemeVariant::HighContrast => Color::LightCyan,
        }
    }

    pub fn fg_warning() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::YELLOW,
            ThemeVariant::Dark => Color::Yellow,
            ThemeVariant::HighContrast => Color::LightYellow,
        }
    }

    pub fn fg_success() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::GREEN,
            ThemeVariant::Dark => Color::Green,
            ThemeVariant::HighContrast => Color::LightGreen,
        }
    }

    pub fn border() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::SURFACE0,
            ThemeVariant::Dark => Color::DarkGray,
            ThemeVariant::HighContrast => Color::Gray,
        }
    }

    pub fn border_focused() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::LAVENDER,
            ThemeVariant::Dark => Color::Cyan,
            ThemeVariant::HighContrast => Color::LightCyan,
        }
    }

    /// Main background color for the entire UI
    pub fn bg_main() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::BASE,
            // Basic themes use terminal default
            _ => Color::Reset,
        }
    }
}

/// UI symbols - centralized for consistency
pub mod symbols {
    pub const CHECKED: &str = "[x]";
    pub const UNCHECKED: &str = "[ ]";
    pub const IDLE: &str = "●";
    pub const ARROW: &str = "→";
}

/// Pre-composed styles for common UI elements
pub struct Theme;

impl Theme {
    // === Selection Styles ===

    pub fn selected() -> Style {
        Style::default()
            .bg(colors::bg_selection())
            .fg(colors::fg_selection())
    }

    pub fn selected_bold() -> Style {
        Self::selected().add_modifier(Modifier::BOLD)
    }

    // === Text Styles ===

    pub fn text() -> Style {
        Style::default()
            .fg(colors::fg_primary())
            .bg(colors::bg_main())
    }

    /// Placeholders and secondary hints
    pub fn text_muted() -> Style {
        Style::default()
            .fg(colors::fg_muted())
            .bg(colors::bg_main())
    }

    pub fn text_success() -> Style {
        Style::default()
            .fg(colors::fg_success())
            .bg(colors::bg_main())
    }

    pub fn label() -> Style {
        Style::default()
            .fg(colors::fg_muted())
            .bg(colors::bg_main())
            .add_modifier(Modifier::BOLD)
    }

    // === Status Bar ===

    pub fn status_bar() -> Style {
        Style::default()
            .bg(colors::bg_status())
            .fg(colors::fg_primary())
    }

    pub fn status_busy() -> Style {
        Style::default()
            .bg(colors::bg_status())
            .fg(colors::fg_warning())
    }

    pub fn status_idle() -> Style {
        Style::default()
            .bg(colors::bg_status())
            .fg(colors::fg_success())
    }

    // === Alerts ===

    pub fn error_bar() -> Style {
        Style::default()
            .bg(colors::bg_error())
            .fg(colors::fg_on_alert())
    }

    pub fn warning_bar() -> Style {
        Style::default()
            .bg(colors::bg_warning())
            .fg(colors::fg_on_alert())
    }

    // === Help Bar ===

    pub fn help_bar() -> Style {
        Style::default()
            .bg(colors::bg_status())
            .fg(colors::fg_primary())
    }

    pub fn help_key() -> Style {
        Style::default()
            .bg(colors::bg_status())
            .fg(colors::fg_warning())
    }

    pub fn help_desc() -> Style {
        Style::default()
            .bg(colors::bg_status())
            .fg(colors::fg_muted())
    }

    // === Borders ===

    pub fn border() -> Style {
        Style::default().fg(colors::border()).bg(colors::bg_main())
    }

    pub fn border_focused() -> Style {
        Style::default()
            .fg(colors::border_focused())
            .bg(colors::bg_main())
    }

    /// Main background style - fills the whole frame
    pub fn main_bg() -> Style {
        Style::default().bg(colors::bg_main())
    }

    // === Form ===

    /// The generate button when it does not have focus
    pub fn button() -> Style {
        Style::default()
            .fg(colors::fg_accent())
            .bg(colors::bg_main())
            .add_modifier(Modifier::BOLD)
    }
}
