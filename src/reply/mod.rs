//! Reply drafting: intent selection, prompt assembly and generation
//!
//! The form snapshots its fields into a [`ReplyRequest`]; the
//! [`ReplyComposer`] turns that into one instruction string and hands it to a
//! [`crate::ai::TextGenerator`].

mod composer;
mod error;
mod intent;
mod prompt;
mod request;

pub use composer::ReplyComposer;
pub use error::ReplyError;
pub use intent::{Intent, IntentFlags};
pub use request::{ReplyRequest, intent_summary};
