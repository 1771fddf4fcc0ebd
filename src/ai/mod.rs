//! Text generation through the Gemini API
//!
//! - [`TextGenerator`]: the narrow seam the reply composer talks to
//! - [`GeminiClient`]: the production implementation
//! - an actor that runs generation on a tokio task so the UI keeps rendering

mod actor;
mod client;
mod error;
mod generator;

pub use actor::{AiActorHandle, AiCommand, AiEvent, spawn_ai_actor};
pub use client::GeminiClient;
pub use error::GenerateError;
#[cfg(test)]
pub use generator::fake;
pub use generator::TextGenerator;
