//! Main event loop and AI event processing

use anyhow::Result;
use crossterm::event::{self, Event};
use std::time::Duration;

use crate::constants::{BUSY_POLL_MS, IDLE_POLL_MS};
use crate::input::{InputResult, handle_input};

use super::App;
use super::render_thread::RenderThread;

impl App {
    pub(crate) async fn event_loop(&mut self, render_thread: &RenderThread) -> Result<()> {
        loop {
            // Process AI events from the actor (non-blocking)
            if self.process_ai_events() {
                self.dirty = true;
            }

            // Clear expired alerts
            if self.state.clear_alert_if_expired() {
                self.dirty = true;
            }

            // Render when dirty; keep rendering while busy so the spinner animates
            if self.dirty || self.state.is_busy() {
                render_thread.render(self.state.clone());
                self.dirty = false;
            }

            // Handle input (adaptive timeout: faster while a request is in flight)
            let poll_timeout = if self.state.is_busy() {
                BUSY_POLL_MS
            } else {
                IDLE_POLL_MS
            };
            if event::poll(Duration::from_millis(poll_timeout))? {
                let evt = event::read()?;
                // Any input event (including resize) requires re-render
                self.dirty = true;
                if let Event::Resize(width, height) = evt {
                    self.resize(width, height);
                }
                match handle_input(evt, &self.state, &self.bindings) {
                    InputResult::Quit => break,
                    InputResult::Action(action) => self.handle_action(action).await,
                    InputResult::Char(c) => self.handle_char(c),
                    InputResult::Backspace => self.handle_backspace(),
                    InputResult::Paste(text) => self.handle_paste(&text),
                    InputResult::Continue => {}
                }
            }
        }

        Ok(())
    }

    /// Drain events from the AI actor. Returns true if any events were processed.
    pub(crate) fn process_ai_events(&mut self) -> bool {
        let mut had_events = false;
        while let Ok(event) = self.ai_actor.event_rx.try_recv() {
            had_events = true;
            self.handle_ai_event(event);
        }
        had_events
    }
}
