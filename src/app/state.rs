//! Application state types
//!
//! All state types live here to maintain clean dependency:
//! UI layer imports from app layer, not vice versa.

use std::time::Instant;

use crate::constants::{ERROR_TTL_SECS, INTENTS_PER_ROW};
use crate::reply::{Intent, IntentFlags, ReplyError, ReplyRequest};

/// Focusable parts of the form, in tab order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Message,
    Intents,
    Custom,
    Generate,
    Output,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            Self::Message => Self::Intents,
            Self::Intents => Self::Custom,
            Self::Custom => Self::Generate,
            Self::Generate => Self::Output,
            Self::Output => Self::Message,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Message => Self::Output,
            Self::Intents => Self::Message,
            Self::Custom => Self::Intents,
            Self::Generate => Self::Custom,
            Self::Output => Self::Generate,
        }
    }
}

/// Everything the user can edit on the form
#[derive(Debug, Clone, Default)]
pub struct FormState {
    /// Pasted message to reply to
    pub message: String,
    pub flags: IntentFlags,
    /// Index into `Intent::ALL` of the highlighted checkbox
    pub intent_cursor: usize,
    pub custom_intent: String,
    /// Generated draft, editable after it arrives
    pub output: String,
    pub output_scroll: u16,
    pub field: FormField,
}

impl FormState {
    /// Snapshot the form into a request. Fails if the message is blank.
    pub fn collect(&self) -> Result<ReplyRequest, ReplyError> {
        ReplyRequest::new(self.message.clone(), self.flags, &self.custom_intent)
    }

    pub fn highlighted_intent(&self) -> Intent {
        Intent::ALL[self.intent_cursor.min(Intent::ALL.len() - 1)]
    }

    pub fn toggle_highlighted(&mut self) {
        let intent = self.highlighted_intent();
        self.flags.toggle(intent);
    }

    /// Move the checkbox highlight within the grid (clamped, no wrap)
    pub fn move_intent_cursor(&mut self, dx: isize, dy: isize) {
        let count = Intent::ALL.len() as isize;
        let row_len = INTENTS_PER_ROW as isize;
        let target = self.intent_cursor as isize + dx + dy * row_len;
        if (0..count).contains(&target) {
            self.intent_cursor = target as usize;
        }
    }

    /// Text buffer behind the focused field, if it accepts typing
    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Message => Some(&mut self.message),
            FormField::Custom => Some(&mut self.custom_intent),
            FormField::Output => Some(&mut self.output),
            FormField::Intents | FormField::Generate => None,
        }
    }

    /// Append a character to the focused field. Returns false if nothing changed.
    pub fn insert_char(&mut self, c: char) -> bool {
        // Custom intent is single-line
        if c == '\n' && self.field == FormField::Custom {
            return false;
        }
        match self.focused_text_mut() {
            Some(text) => {
                text.push(c);
                true
            }
            None => false,
        }
    }

    /// Append pasted text; newlines collapse to spaces in single-line fields
    pub fn insert_str(&mut self, pasted: &str) -> bool {
        let single_line = self.field == FormField::Custom;
        let Some(text) = self.focused_text_mut() else {
            return false;
        };
        let pasted = pasted.replace("\r\n", "\n").replace('\r', "\n");
        if single_line {
            text.push_str(&pasted.replace('\n', " "));
        } else {
            text.push_str(&pasted);
        }
        true
    }

    pub fn backspace(&mut self) -> bool {
        self.focused_text_mut()
            .map(|text| text.pop().is_some())
            .unwrap_or(false)
    }

    /// Move the draft view by `delta` rows, staying within `0..=max`
    pub fn scroll_output(&mut self, delta: i32, max: u16) {
        let scroll = (self.output_scroll as i32 + delta).clamp(0, max as i32);
        self.output_scroll = scroll as u16;
    }

    /// Replace the draft with freshly generated text
    pub fn set_output(&mut self, text: String) {
        self.output = text;
        self.output_scroll = 0;
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
        self.output_scroll = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    /// Recoverable input problem, e.g. missing message
    Warning,
    /// Service failure
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: AlertLevel,
    pub text: String,
}

/// Busy flag, alert bar and status message
#[derive(Debug, Clone, Default)]
pub struct StatusState {
    /// A generation request is in flight
    pub busy: bool,
    pub alert: Option<Alert>,
    pub alert_time: Option<Instant>,
    pub message: String,
}

impl StatusState {
    fn set_alert(&mut self, level: AlertLevel, text: impl ToString) {
        self.alert = Some(Alert {
            level,
            text: text.to_string(),
        });
        self.alert_time = Some(Instant::now());
    }

    pub fn set_warning(&mut self, text: impl ToString) {
        self.set_alert(AlertLevel::Warning, text);
    }

    pub fn set_error(&mut self, text: impl ToString) {
        self.set_alert(AlertLevel::Error, text);
    }

    pub fn clear_alert(&mut self) {
        self.alert = None;
        self.alert_time = None;
    }

    /// Clear alert if TTL expired. Returns true if it was cleared.
    pub fn clear_alert_if_expired(&mut self) -> bool {
        if let Some(time) = self.alert_time
            && time.elapsed().as_secs() >= ERROR_TTL_SECS
        {
            self.clear_alert();
            true
        } else {
            false
        }
    }

    pub fn set_message(&mut self, msg: impl ToString) {
        self.message = msg.to_string();
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub form: FormState,
    pub status: StatusState,
}

impl AppState {
    // Delegate methods to StatusState
    pub fn set_warning(&mut self, text: impl ToString) {
        self.status.set_warning(text);
    }

    pub fn set_error(&mut self, text: impl ToString) {
        self.status.set_error(text);
    }

    pub fn clear_alert_if_expired(&mut self) -> bool {
        self.status.clear_alert_if_expired()
    }

    pub fn set_status(&mut self, msg: impl ToString) {
        self.status.set_message(msg);
    }

    pub fn is_busy(&self) -> bool {
        self.status.busy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_cycle_visits_every_field() {
        let mut field = FormField::Message;
        let mut seen = vec![field];
        for _ in 0..4 {
            field = field.next();
            seen.push(field);
        }
        assert_eq!(field.next(), FormField::Message);
        assert_eq!(seen.len(), 5);
        for f in &seen {
            assert_eq!(f.next().prev(), *f);
        }
    }

    #[test]
    fn test_collect_rejects_blank_message() {
        let form = FormState {
            message: " \n ".to_string(),
            ..Default::default()
        };
        assert!(matches!(form.collect(), Err(ReplyError::EmptyMessage)));
    }

    #[test]
    fn test_collect_snapshots_fields() {
        let mut form = FormState {
            message: "Can we switch to Friday?".to_string(),
            custom_intent: "Friday at 5 works".to_string(),
            ..Default::default()
        };
        form.flags.toggle(Intent::Accept);

        let request = form.collect().unwrap();
        assert_eq!(request.source_message(), "Can we switch to Friday?");
        assert_eq!(
            request.composed_intent_summary(),
            "accept / confirm no problem, Friday at 5 works"
        );
    }

    #[test]
    fn test_intent_cursor_moves_in_grid() {
        let mut form = FormState::default();
        form.move_intent_cursor(0, 1);
        assert_eq!(form.highlighted_intent(), Intent::Homework);
        form.move_intent_cursor(2, 0);
        assert_eq!(form.highlighted_intent(), Intent::Cheer);
        // Clamped at the edges
        form.move_intent_cursor(1, 0);
        assert_eq!(form.highlighted_intent(), Intent::Cheer);
        form.move_intent_cursor(0, 1);
        assert_eq!(form.highlighted_intent(), Intent::Cheer);

        form.toggle_highlighted();
        assert!(form.flags.cheer);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = FormState::default();
        assert!(form.insert_char('H'));
        assert!(form.insert_char('\n'));
        assert_eq!(form.message, "H\n");

        form.field = FormField::Custom;
        assert!(!form.insert_char('\n'));
        assert!(form.insert_str("line one\r\nline two"));
        assert_eq!(form.custom_intent, "line one line two");

        form.field = FormField::Generate;
        assert!(!form.insert_char('x'));
        assert!(!form.backspace());

        form.field = FormField::Message;
        assert!(form.backspace());
        assert_eq!(form.message, "H");
    }

    #[test]
    fn test_output_scroll_stays_in_range() {
        let mut form = FormState::default();
        form.scroll_output(-3, 20);
        assert_eq!(form.output_scroll, 0);
        form.scroll_output(5, 20);
        assert_eq!(form.output_scroll, 5);
        form.scroll_output(100, 20);
        assert_eq!(form.output_scroll, 20);
        form.scroll_output(-1, 20);
        assert_eq!(form.output_scroll, 19);
        form.set_output("new".to_string());
        assert_eq!(form.output_scroll, 0);
    }

    #[test]
    fn test_alert_levels() {
        let mut status = StatusState::default();
        status.set_warning("paste a message");
        assert_eq!(status.alert.as_ref().unwrap().level, AlertLevel::Warning);
        status.set_error("boom");
        assert_eq!(status.alert.as_ref().unwrap().level, AlertLevel::Error);
        assert!(!status.clear_alert_if_expired());
        status.clear_alert();
        assert!(status.alert.is_none());
    }
}
