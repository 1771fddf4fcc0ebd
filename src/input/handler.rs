use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::keybindings::{Action, KeyBindings};
use crate::app::state::{AppState, FormField};
use crate::reply::Intent;

pub enum InputResult {
    Continue,
    Quit,
    Action(Action),
    Char(char),
    Backspace,
    /// Bracketed paste, delivered as one chunk
    Paste(String),
}

pub fn handle_input(event: Event, state: &AppState, bindings: &KeyBindings) -> InputResult {
    match event {
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
            handle_key(key_event, state, bindings)
        }
        // Editing is frozen while a draft is being generated
        Event::Paste(text) if !state.is_busy() => InputResult::Paste(text),
        _ => InputResult::Continue,
    }
}

fn handle_key(key: KeyEvent, state: &AppState, bindings: &KeyBindings) -> InputResult {
    // Global bindings first (Tab, Ctrl+G, Alt+digit, ...)
    if let Some(action) = bindings.get(&key) {
        if action == Action::Quit {
            return InputResult::Quit;
        }
        return InputResult::Action(action);
    }

    // Unbound chords never reach a text field
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return InputResult::Continue;
    }

    if state.is_busy() {
        return InputResult::Continue;
    }

    match state.form.field {
        FormField::Message | FormField::Output => handle_multiline_input(key),
        FormField::Custom => handle_single_line_input(key),
        FormField::Intents => handle_intents_input(key),
        FormField::Generate => handle_button_input(key),
    }
}

fn handle_multiline_input(key: KeyEvent) -> InputResult {
    match key.code {
        KeyCode::Char(c) => InputResult::Char(c),
        KeyCode::Enter => InputResult::Char('\n'),
        KeyCode::Backspace => InputResult::Backspace,
        _ => InputResult::Continue,
    }
}

fn handle_single_line_input(key: KeyEvent) -> InputResult {
    match key.code {
        KeyCode::Char(c) => InputResult::Char(c),
        KeyCode::Enter => InputResult::Action(Action::NextField),
        KeyCode::Backspace => InputResult::Backspace,
        _ => InputResult::Continue,
    }
}

fn handle_intents_input(key: KeyEvent) -> InputResult {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => InputResult::Action(Action::Toggle),
        KeyCode::Char(c) => match c.to_digit(10) {
            Some(n @ 1..=6) => InputResult::Action(Action::ToggleIntent(Intent::ALL[n as usize - 1])),
            _ => InputResult::Continue,
        },
        _ => InputResult::Continue,
    }
}

fn handle_button_input(key: KeyEvent) -> InputResult {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => InputResult::Action(Action::Generate),
        _ => InputResult::Continue,
    }
}
