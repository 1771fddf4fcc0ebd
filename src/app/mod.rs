//! Application core - owns form state and coordinates the AI actor

mod actions;
mod event_loop;
pub mod render_thread;
pub mod state;

use anyhow::Result;
use ratatui::layout::Rect;

use render_thread::RenderThread;

use crate::ai::{AiActorHandle, AiCommand, TextGenerator, spawn_ai_actor};
use crate::input::KeyBindings;
use crate::reply::ReplyComposer;
use state::AppState;

pub struct App {
    pub(crate) state: AppState,
    pub(crate) bindings: KeyBindings,
    /// Runs generation off the event loop so the spinner keeps moving
    pub(crate) ai_actor: AiActorHandle,
    /// Dirty flag: when true, UI needs re-render. Skips renders when nothing changed.
    pub(crate) dirty: bool,
    /// Terminal size, kept for clamping the draft scroll offset
    pub(crate) viewport: Rect,
}

impl App {
    /// Must be called inside a tokio runtime (spawns the AI actor).
    pub fn new<G>(generator: G) -> Self
    where
        G: TextGenerator + 'static,
    {
        let ai_actor = spawn_ai_actor(ReplyComposer::new(generator));

        let mut state = AppState::default();
        state.set_status("Paste a message, pick intents, then Ctrl+G");

        Self {
            state,
            bindings: KeyBindings::new(),
            ai_actor,
            dirty: true, // Start dirty for initial render
            viewport: Rect::new(0, 0, 80, 24),
        }
    }

    /// Run the form until the user quits. Returns the last draft so the
    /// caller can print it after the terminal is restored.
    pub async fn run(&mut self) -> Result<String> {
        // Spawn background render thread (owns terminal setup/teardown)
        let render_thread = RenderThread::spawn()?;
        if let Ok((width, height)) = crossterm::terminal::size() {
            self.resize(width, height);
        }

        let result = self.event_loop(&render_thread).await;

        // Shutdown render thread (handles terminal cleanup)
        render_thread.shutdown();

        self.ai_actor.cmd_tx.send(AiCommand::Shutdown).await.ok();

        result.map(|()| std::mem::take(&mut self.state.form.output))
    }

    pub(crate) fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Rect::new(0, 0, width, height);
        self.scroll_output(0);
    }
}
