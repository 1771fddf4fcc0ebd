//! Action handlers for user input
//!
//! - `input`: Text input handling
//! - `generate`: Starting a draft and applying the AI result

mod generate;
mod input;

use crate::input::Action;
use crate::ui::output_max_scroll;

use super::App;
use super::state::FormField;

/// Lines moved by PageUp/PageDown in the output area
const OUTPUT_PAGE_LINES: i32 = 10;

impl App {
    pub(crate) async fn handle_action(&mut self, action: Action) {
        self.state.status.clear_alert();

        match action {
            Action::NextField => self.state.form.field = self.state.form.field.next(),
            Action::PrevField => self.state.form.field = self.state.form.field.prev(),

            Action::Up => self.move_vertical(-1),
            Action::Down => self.move_vertical(1),
            Action::Left => self.move_horizontal(-1),
            Action::Right => self.move_horizontal(1),
            Action::PageUp => self.scroll_output(-OUTPUT_PAGE_LINES),
            Action::PageDown => self.scroll_output(OUTPUT_PAGE_LINES),

            Action::Toggle => match self.state.form.field {
                FormField::Intents => self.state.form.toggle_highlighted(),
                FormField::Generate => self.start_generation().await,
                _ => {}
            },
            Action::ToggleIntent(intent) => self.state.form.flags.toggle(intent),

            Action::Generate => self.start_generation().await,
            Action::Quit => {} // Handled in event loop
        }
    }

    fn move_vertical(&mut self, delta: isize) {
        match self.state.form.field {
            FormField::Intents => self.state.form.move_intent_cursor(0, delta),
            FormField::Output => self.scroll_output(delta as i32),
            _ => {}
        }
    }

    pub(crate) fn scroll_output(&mut self, delta: i32) {
        let max = output_max_scroll(&self.state.form, self.viewport);
        self.state.form.scroll_output(delta, max);
    }

    fn move_horizontal(&mut self, delta: isize) {
        if self.state.form.field == FormField::Intents {
            self.state.form.move_intent_cursor(delta, 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::fake::FakeGenerator;
    use crate::reply::Intent;

    #[tokio::test]
    async fn test_tab_cycles_fields() {
        let mut app = App::new(FakeGenerator::replying("unused"));
        app.handle_action(Action::NextField).await;
        assert_eq!(app.state.form.field, FormField::Intents);
        app.handle_action(Action::PrevField).await;
        app.handle_action(Action::PrevField).await;
        assert_eq!(app.state.form.field, FormField::Output);
    }

    #[tokio::test]
    async fn test_intent_grid_navigation_and_toggle() {
        let mut app = App::new(FakeGenerator::replying("unused"));
        app.state.form.field = FormField::Intents;

        app.handle_action(Action::Right).await;
        app.handle_action(Action::Toggle).await;
        assert!(app.state.form.flags.decline);

        app.handle_action(Action::Down).await;
        app.handle_action(Action::Toggle).await;
        assert!(app.state.form.flags.fee);

        app.handle_action(Action::Toggle).await;
        assert!(!app.state.form.flags.fee);
    }

    #[tokio::test]
    async fn test_direct_intent_toggle_works_from_any_field() {
        let mut app = App::new(FakeGenerator::replying("unused"));
        app.handle_action(Action::ToggleIntent(Intent::Thanks)).await;
        assert!(app.state.form.flags.thanks);
        assert_eq!(app.state.form.field, FormField::Message);
    }

    #[tokio::test]
    async fn test_arrows_scroll_output_only_when_focused() {
        let mut app = App::new(FakeGenerator::replying("unused"));
        app.resize(90, 32);
        app.handle_action(Action::Down).await;
        assert_eq!(app.state.form.output_scroll, 0);

        app.state.form.field = FormField::Output;
        app.state.form.output = (1..=60).map(|n| format!("line {}\n", n)).collect();
        app.handle_action(Action::PageDown).await;
        app.handle_action(Action::Up).await;
        assert_eq!(app.state.form.output_scroll, 9);
    }

    #[tokio::test]
    async fn test_output_scroll_stops_at_the_end() {
        let mut app = App::new(FakeGenerator::replying("unused"));
        app.resize(90, 32);
        app.state.form.field = FormField::Output;
        app.state.form.output = "A short draft.".to_string();

        for _ in 0..5 {
            app.handle_action(Action::PageDown).await;
        }
        assert_eq!(app.state.form.output_scroll, 0);

        app.state.form.output = (1..=60).map(|n| format!("line {}\n", n)).collect();
        let max = output_max_scroll(&app.state.form, app.viewport);
        assert!(max > 0);
        for _ in 0..10 {
            app.handle_action(Action::PageDown).await;
        }
        assert_eq!(app.state.form.output_scroll, max);

        // One step up is visible immediately
        app.handle_action(Action::Up).await;
        assert_eq!(app.state.form.output_scroll, max - 1);

        // Growing the terminal pulls the offset back in range
        app.resize(90, 200);
        assert_eq!(
            app.state.form.output_scroll,
            output_max_scroll(&app.state.form, app.viewport)
        );
    }
}
