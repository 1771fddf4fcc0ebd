use thiserror::Error;

use crate::ai::GenerateError;

/// Errors surfaced to the user while drafting a reply
#[derive(Debug, Error)]
pub enum ReplyError {
    /// The source message is empty or whitespace-only
    #[error("Please paste the message you want to reply to.")]
    EmptyMessage,

    /// The text-generation service failed
    #[error("Generation failed: {0}")]
    Service(#[from] GenerateError),
}
