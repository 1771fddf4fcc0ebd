//! Background render thread for non-blocking UI rendering.
//!
//! The render thread owns the Terminal and renders snapshots of AppState
//! sent from the main event loop. This keeps the event loop responsive
//! to AI events and user input.

use std::io;
use std::sync::mpsc::{self, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};

use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use super::state::AppState;

/// Command sent to the render thread.
pub enum RenderCommand {
    /// Render this state snapshot
    Render(Box<AppState>),
    /// Shutdown the render thread
    Shutdown,
}

/// Handle to the background render thread.
pub struct RenderThread {
    /// Snapshots for the render thread
    cmd_tx: SyncSender<RenderCommand>,
    /// Joined on shutdown so the terminal is restored before we print
    handle: Option<JoinHandle<()>>,
}

impl RenderThread {
    /// Spawn a new render thread.
    ///
    /// The render thread takes ownership of terminal setup/teardown,
    /// including bracketed paste so pasted messages arrive as one event.
    pub fn spawn() -> io::Result<Self> {
        // Capacity 1: only the latest state matters
        let (cmd_tx, cmd_rx) = mpsc::sync_channel::<RenderCommand>(1);

        let handle = thread::spawn(move || {
            // Terminal setup happens on this thread
            if let Err(e) = enable_raw_mode() {
                tracing::error!("Failed to enable raw mode: {}", e);
                return;
            }

            let mut stdout = io::stdout();
            if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableBracketedPaste) {
                tracing::error!("Failed to enter alternate screen: {}", e);
                disable_raw_mode().ok();
                return;
            }

            let backend = CrosstermBackend::new(stdout);
            let mut terminal = match Terminal::new(backend) {
                Ok(t) => t,
                Err(e) => {
                    tracing::error!("Failed to create terminal: {}", e);
                    disable_raw_mode().ok();
                    return;
                }
            };

            // Render loop
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    RenderCommand::Render(state) => {
                        if let Err(e) = terminal.draw(|f| crate::ui::render(f, &state)) {
                            tracing::error!("Render error: {}", e);
                        }
                    }
                    RenderCommand::Shutdown => break,
                }
            }

            // Restore the terminal, paste mode included
            disable_raw_mode().ok();
            execute!(
                terminal.backend_mut(),
                DisableBracketedPaste,
                LeaveAlternateScreen
            )
            .ok();
        });

        Ok(Self {
            cmd_tx,
            handle: Some(handle),
        })
    }

    /// Request a render of the given state (non-blocking).
    ///
    /// If the render thread is busy the frame is dropped; the next
    /// loop iteration sends a fresher one.
    pub fn render(&self, state: AppState) {
        match self.cmd_tx.try_send(RenderCommand::Render(Box::new(state))) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                // A frame is still pending; this one is dropped
                tracing::trace!("Render thread busy, skipping frame");
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::error!("Render thread disconnected");
            }
        }
    }

    /// Shutdown the render thread and wait for it to finish.
    pub fn shutdown(mut self) {
        // Blocking send so the command is not dropped
        let _ = self.cmd_tx.send(RenderCommand::Shutdown);

        // Wait for terminal cleanup
        if let Some(handle) = self.handle.take() {
            handle.join().ok();
        }
    }
}
