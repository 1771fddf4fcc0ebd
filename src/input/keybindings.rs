use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::reply::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Focus
    NextField,
    PrevField,

    // Navigation
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,

    // Form
    Toggle,
    ToggleIntent(Intent),
    Generate,
    Quit,
}

/// Bindings that apply whichever field has focus. Plain keys are left to
/// the focused field (see handler.rs).
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, Action>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            bindings: Self::form_bindings(),
        }
    }

    pub fn get(&self, event: &KeyEvent) -> Option<Action> {
        self.bindings.get(event).copied()
    }

    fn form_bindings() -> HashMap<KeyEvent, Action> {
        let mut map = HashMap::new();

        // Focus
        map.insert(key_code(KeyCode::Tab), Action::NextField);
        map.insert(key_code(KeyCode::BackTab), Action::PrevField);
        map.insert(shift_key_code(KeyCode::BackTab), Action::PrevField);

        // Navigation
        map.insert(key_code(KeyCode::Up), Action::Up);
        map.insert(key_code(KeyCode::Down), Action::Down);
        map.insert(key_code(KeyCode::Left), Action::Left);
        map.insert(key_code(KeyCode::Right), Action::Right);
        map.insert(key_code(KeyCode::PageUp), Action::PageUp);
        map.insert(key_code(KeyCode::PageDown), Action::PageDown);

        // Form
        map.insert(ctrl_key('g'), Action::Generate);
        map.insert(key_code(KeyCode::F(5)), Action::Generate);
        map.insert(ctrl_key('q'), Action::Quit);
        map.insert(ctrl_key('c'), Action::Quit);

        // Alt+1..6 toggles an intent without leaving the current field
        for (digit, intent) in ('1'..='6').zip(Intent::ALL) {
            map.insert(alt_key(digit), Action::ToggleIntent(intent));
        }

        map
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn alt_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::ALT)
}

fn key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn shift_key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::SHIFT)
}
