//! Text input handling (chars, backspace, paste)

use super::super::App;

impl App {
    pub(crate) fn handle_char(&mut self, c: char) {
        if self.state.form.insert_char(c) {
            self.state.status.clear_alert();
        }
    }

    pub(crate) fn handle_backspace(&mut self) {
        self.state.form.backspace();
    }

    pub(crate) fn handle_paste(&mut self, text: &str) {
        if self.state.form.insert_str(text) {
            self.state.status.clear_alert();
        } else {
            tracing::debug!("Paste ignored: focused field is not editable");
        }
    }
}
