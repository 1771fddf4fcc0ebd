//! Status bar rendering with the busy spinner

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::{Theme, symbols};
use crate::app::state::StatusState;
use crate::constants::{GEMINI_MODEL, SPINNER_FRAME_MS};

const APP_NAME: &str = "replydraft";

pub fn status_bar(frame: &mut Frame, area: Rect, status: &StatusState) {
    let style = Theme::status_bar();

    let (indicator, indicator_style) = if status.busy {
        (format!(" {} ", spinner_char()), Theme::status_busy())
    } else {
        (format!(" {} ", symbols::IDLE), Theme::status_idle())
    };

    let model = GEMINI_MODEL.trim_start_matches("models/");
    let right = format!(" {} ", model);
    let name = format!("{} ", APP_NAME);

    let fixed = indicator.width() + name.width() + right.width();
    let message_room = (area.width as usize).saturating_sub(fixed + 1);
    let message = truncate_to_width(&status.message, message_room);
    let padding = (area.width as usize).saturating_sub(fixed + message.width());

    let line = Line::from(vec![
        Span::styled(indicator, indicator_style),
        Span::styled(name, Theme::status_bar().add_modifier(ratatui::style::Modifier::BOLD)),
        Span::styled(message, style),
        Span::styled(" ".repeat(padding), style),
        Span::styled(right, Theme::help_desc()),
    ]);

    frame.render_widget(Paragraph::new(line).style(style), area);
}

/// Truncate string to fit display width
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width < 4 {
        return s.chars().take(max_width).collect();
    }

    let mut width = 0;
    let mut result = String::new();
    for c in s.chars() {
        let char_width = c.width().unwrap_or(1);
        if width + char_width > max_width - 3 {
            break;
        }
        width += char_width;
        result.push(c);
    }
    result.push_str("...");
    result
}

/// Get an animated spinner character for loading states
pub fn spinner_char() -> char {
    let spinner = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let idx = (millis / SPINNER_FRAME_MS) as usize % spinner.chars().count();

    spinner.chars().nth(idx).unwrap_or('*')
}
