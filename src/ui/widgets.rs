//! Common UI widgets and utilities

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use crate::app::state::{Alert, AlertLevel};

pub fn alert_bar(frame: &mut Frame, area: Rect, alert: &Alert) {
    let (style, prefix) = match alert.level {
        AlertLevel::Warning => (Theme::warning_bar(), "Warning"),
        AlertLevel::Error => (Theme::error_bar(), "Error"),
    };
    let text = sanitize_text(&alert.text).replace('\n', " ");
    let paragraph = Paragraph::new(format!(" {}: {} ", prefix, text)).style(style);
    frame.render_widget(paragraph, area);
}

pub fn help_bar(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let available_width = area.width as usize;

    // Format: " key desc │" (separator between hints)
    let hint_widths: Vec<usize> = hints
        .iter()
        .enumerate()
        .map(|(i, (key, desc))| {
            let base = key.width() + 2 + desc.width();
            if i < hints.len() - 1 {
                base + 3 // " │ " separator
            } else {
                base + 1 // trailing space
            }
        })
        .collect();

    let mut total_width = 0;
    let mut hints_to_show = 0;
    for width in &hint_widths {
        if total_width + width <= available_width {
            total_width += width;
            hints_to_show += 1;
        } else {
            break;
        }
    }

    // Show at least one hint if possible
    hints_to_show = hints_to_show.max(1).min(hints.len());

    let mut spans: Vec<Span> = Vec::new();
    for (i, (key, desc)) in hints.iter().take(hints_to_show).enumerate() {
        spans.push(Span::styled(format!(" {} ", key), Theme::help_key()));
        spans.push(Span::styled(desc.to_string(), Theme::help_desc()));
        if i < hints_to_show - 1 {
            spans.push(Span::styled(" │ ", Theme::help_desc()));
        }
    }
    spans.push(Span::styled(" ", Theme::help_desc()));

    let paragraph = Paragraph::new(Line::from(spans)).style(Theme::help_bar());
    frame.render_widget(paragraph, area);
}

/// Word-wrapped paragraph used by the multi-line fields
pub fn wrapped_paragraph(text: String) -> Paragraph<'static> {
    Paragraph::new(text)
        .style(Theme::text())
        .wrap(Wrap { trim: false })
}

/// Rows `text` occupies once word-wrapped to `width` columns.
pub fn wrapped_rows(text: &str, width: u16) -> u16 {
    wrapped_paragraph(text.to_string())
        .line_count(width.max(1))
        .try_into()
        .unwrap_or(u16::MAX)
}

/// Sanitize text for display: remove control characters and ANSI escape sequences
pub fn sanitize_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        // ANSI escape sequence (ESC [ ... letter)
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            while let Some(&ch) = chars.peek() {
                chars.next();
                if ch.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        // Replace other control characters (except newline) with space
        if c == '\t' {
            result.push_str("    ");
        } else if c.is_control() && c != '\n' {
            result.push(' ');
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_escape_sequences() {
        assert_eq!(sanitize_text("\x1b[31mred\x1b[0m text"), "red text");
        assert_eq!(sanitize_text("a\tb\x07c\nd"), "a    b c\nd");
    }

    #[test]
    fn test_wrapped_rows_break_at_words() {
        assert_eq!(wrapped_rows("0123456789", 10), 1);
        assert_eq!(wrapped_rows("a\nb", 10), 2);
        // "hello" does not fit after "12345678 " and moves to the next row
        assert_eq!(wrapped_rows("12345678 hello", 10), 2);
        assert_eq!(wrapped_rows("1234 6789 1234 6789 hello", 10), 3);
        // Wide characters take two columns each
        assert_eq!(wrapped_rows("ありがとうございます", 10), 2);
    }
}
