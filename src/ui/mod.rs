mod form;
mod status_bar;
pub mod theme;
mod widgets;

use ratatui::Frame;

use crate::app::state::AppState;

pub use form::output_max_scroll;

pub fn render(frame: &mut Frame, state: &AppState) {
    form::render_form(frame, state);
}
