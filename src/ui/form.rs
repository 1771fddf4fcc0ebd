//! The reply form: message, intents, custom intent, generate button, draft

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::status_bar::status_bar;
use super::theme::{Theme, borders, symbols};
use super::widgets::{alert_bar, help_bar, sanitize_text, wrapped_paragraph, wrapped_rows};
use crate::app::state::{AppState, FormField, FormState};
use crate::constants::{
    INTENT_PANEL_HEIGHT, INTENTS_PER_ROW, MESSAGE_BOX_HEIGHT, SINGLE_LINE_HEIGHT,
};
use crate::reply::{Intent, intent_summary};

const CURSOR: &str = "│";

struct FormLayout {
    status_area: Rect,
    message_area: Rect,
    intents_area: Rect,
    custom_area: Rect,
    button_area: Rect,
    output_area: Rect,
    help_area: Rect,
}

fn compute_layout(area: Rect) -> FormLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                   // Status bar
            Constraint::Length(MESSAGE_BOX_HEIGHT),  // Source message
            Constraint::Length(INTENT_PANEL_HEIGHT), // Intent checkboxes
            Constraint::Length(SINGLE_LINE_HEIGHT),  // Custom intent
            Constraint::Length(SINGLE_LINE_HEIGHT),  // Generate button
            Constraint::Min(3),                      // Draft
            Constraint::Length(1),                   // Help bar
        ])
        .split(area);

    FormLayout {
        status_area: chunks[0],
        message_area: chunks[1],
        intents_area: chunks[2],
        custom_area: chunks[3],
        button_area: chunks[4],
        output_area: chunks[5],
        help_area: chunks[6],
    }
}

pub fn render_form(frame: &mut Frame, state: &AppState) {
    frame.render_widget(Block::default().style(Theme::main_bg()), frame.area());

    let layout = compute_layout(frame.area());
    let form = &state.form;

    status_bar(frame, layout.status_area, &state.status);

    render_text_area(
        frame,
        layout.message_area,
        " Message to reply to ",
        &form.message,
        "Paste the message you received here",
        form.field == FormField::Message,
        None,
    );

    render_intents(frame, layout.intents_area, form);

    render_custom_intent(frame, layout.custom_area, form);

    render_button(frame, layout.button_area, form, state.is_busy());

    let draft_title = format!(" Draft reply ({} chars) ", form.output.chars().count());
    let placeholder = if state.is_busy() {
        "Drafting..."
    } else {
        "The generated reply appears here"
    };
    render_text_area(
        frame,
        layout.output_area,
        &draft_title,
        &form.output,
        placeholder,
        form.field == FormField::Output,
        Some(form.output_scroll),
    );

    if let Some(ref alert) = state.status.alert {
        alert_bar(frame, layout.help_area, alert);
    } else {
        help_bar(frame, layout.help_area, hints_for(form.field));
    }
}

fn hints_for(field: FormField) -> &'static [(&'static str, &'static str)] {
    match field {
        FormField::Message => &[
            ("Tab", "next"),
            ("Alt+1-6", "intent"),
            ("Ctrl+G", "generate"),
            ("Ctrl+Q", "quit"),
        ],
        FormField::Intents => &[
            ("←↑↓→", "move"),
            ("Space", "toggle"),
            ("1-6", "toggle"),
            ("Tab", "next"),
            ("Ctrl+G", "generate"),
        ],
        FormField::Custom => &[
            ("Enter", "next"),
            ("Ctrl+G", "generate"),
            ("Ctrl+Q", "quit"),
        ],
        FormField::Generate => &[
            ("Enter", "generate"),
            ("Shift+Tab", "back"),
            ("Ctrl+Q", "quit"),
        ],
        FormField::Output => &[
            ("↑/↓", "scroll"),
            ("PgUp/PgDn", "page"),
            ("Ctrl+G", "regenerate"),
            ("Ctrl+Q", "quit & print"),
        ],
    }
}

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let (border_style, border_type) = if focused {
        (Theme::border_focused(), borders::input_focused())
    } else {
        (Theme::border(), borders::panel())
    };

    Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .title(Span::styled(title, Theme::label()))
}

/// Multi-line text box. With `scroll` set the user controls the offset;
/// otherwise the view follows the end of the text.
fn render_text_area(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
    scroll: Option<u16>,
) {
    let block = field_block(title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if value.is_empty() && !focused {
        let paragraph = Paragraph::new(placeholder).style(Theme::text_muted());
        frame.render_widget(paragraph, inner);
        return;
    }

    let text = display_text(value, focused);
    let max_scroll = max_scroll(&text, inner);
    let offset = match scroll {
        Some(requested) => requested.min(max_scroll),
        None => max_scroll,
    };

    frame.render_widget(wrapped_paragraph(text).scroll((offset, 0)), inner);
}

fn display_text(value: &str, focused: bool) -> String {
    let mut text = sanitize_text(value);
    if focused {
        text.push_str(CURSOR);
    }
    text
}

fn max_scroll(text: &str, inner: Rect) -> u16 {
    wrapped_rows(text, inner.width).saturating_sub(inner.height)
}

/// Largest useful scroll offset of the draft box for a terminal of `area`
pub fn output_max_scroll(form: &FormState, area: Rect) -> u16 {
    let output_area = compute_layout(area).output_area;
    let focused = form.field == FormField::Output;
    let inner = field_block("", focused).inner(output_area);
    max_scroll(&display_text(&form.output, focused), inner)
}

fn render_intents(frame: &mut Frame, area: Rect, form: &FormState) {
    let focused = form.field == FormField::Intents;
    let block = field_block(" Reply should ", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cell_width = (inner.width as usize / INTENTS_PER_ROW).max(1);
    let mut lines: Vec<Line> = Intent::ALL
        .chunks(INTENTS_PER_ROW)
        .enumerate()
        .map(|(row, intents)| {
            let spans = intents
                .iter()
                .enumerate()
                .map(|(col, intent)| {
                    let index = row * INTENTS_PER_ROW + col;
                    intent_cell(form, *intent, index, focused, cell_width)
                })
                .collect::<Vec<_>>();
            Line::from(spans)
        })
        .collect();

    let summary = intent_summary(form.flags, &form.custom_intent);
    lines.push(Line::from(vec![
        Span::styled(format!("{} ", symbols::ARROW), Theme::text_muted()),
        Span::styled(summary, Theme::text_muted()),
    ]));

    frame.render_widget(Paragraph::new(lines).style(Theme::text()), inner);
}

fn intent_cell(
    form: &FormState,
    intent: Intent,
    index: usize,
    focused: bool,
    width: usize,
) -> Span<'static> {
    let checked = form.flags.is_set(intent);
    let mark = if checked {
        symbols::CHECKED
    } else {
        symbols::UNCHECKED
    };
    let mut text = format!("{} {} {}", mark, index + 1, intent.form_label());
    let pad = width.saturating_sub(text.width());
    text.push_str(&" ".repeat(pad));

    let style = if focused && form.intent_cursor == index {
        Theme::selected_bold()
    } else if checked {
        Theme::text_success()
    } else {
        Theme::text()
    };
    Span::styled(text, style)
}

fn render_custom_intent(frame: &mut Frame, area: Rect, form: &FormState) {
    let focused = form.field == FormField::Custom;
    let block = field_block(" Anything else to include ", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let paragraph = if form.custom_intent.is_empty() && !focused {
        Paragraph::new("e.g. Next Tuesday is a holiday").style(Theme::text_muted())
    } else {
        let text = display_text(&form.custom_intent, focused);
        // Keep the end visible when the text is wider than the box
        let overflow = text.width().saturating_sub(inner.width as usize);
        Paragraph::new(text)
            .style(Theme::text())
            .scroll((0, overflow.min(u16::MAX as usize) as u16))
    };
    frame.render_widget(paragraph, inner);
}

fn render_button(frame: &mut Frame, area: Rect, form: &FormState, busy: bool) {
    let focused = form.field == FormField::Generate;
    let block = field_block("", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (label, style) = if busy {
        ("Drafting a reply...", Theme::text_muted())
    } else if focused {
        ("[ Generate reply ]", Theme::selected_bold())
    } else {
        ("[ Generate reply ]", Theme::button())
    };

    let paragraph = Paragraph::new(Span::styled(label, style)).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
