//! The immutable request handed from the form to the composer

use super::error::ReplyError;
use super::intent::IntentFlags;

/// Separator between intents in the composed summary
pub const INTENT_SEPARATOR: &str = ", ";

/// Summary used when no intent is selected and no custom text is given
pub const FALLBACK_INTENT: &str = "reply naturally to match the sender's message";

/// A single generation request.
///
/// Can only be built with a non-blank source message, so anything holding a
/// `ReplyRequest` may call the service without further checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRequest {
    source_message: String,
    selected_intents: Vec<&'static str>,
    custom_intent: Option<String>,
}

impl ReplyRequest {
    pub fn new(
        source_message: impl Into<String>,
        flags: IntentFlags,
        custom_intent: &str,
    ) -> Result<Self, ReplyError> {
        let source_message = source_message.into();
        if source_message.trim().is_empty() {
            return Err(ReplyError::EmptyMessage);
        }

        let selected_intents = flags.selected().map(|i| i.prompt_label()).collect();
        let custom_intent = (!custom_intent.is_empty()).then(|| custom_intent.to_string());

        Ok(Self {
            source_message,
            selected_intents,
            custom_intent,
        })
    }

    pub fn source_message(&self) -> &str {
        &self.source_message
    }

    pub fn selected_intents(&self) -> &[&'static str] {
        &self.selected_intents
    }

    pub fn custom_intent(&self) -> Option<&str> {
        self.custom_intent.as_deref()
    }

    /// Selected intents followed by the custom text, or the fallback phrase.
    /// Never empty.
    pub fn composed_intent_summary(&self) -> String {
        join_intents(&self.selected_intents, self.custom_intent())
    }
}

/// Summary for the current form selection, shown live under the intents.
pub fn intent_summary(flags: IntentFlags, custom_intent: &str) -> String {
    let labels: Vec<&str> = flags.selected().map(|i| i.prompt_label()).collect();
    let custom = (!custom_intent.is_empty()).then_some(custom_intent);
    join_intents(&labels, custom)
}

fn join_intents(labels: &[&str], custom: Option<&str>) -> String {
    let mut parts: Vec<&str> = labels.to_vec();
    if let Some(custom) = custom {
        parts.push(custom);
    }

    if parts.is_empty() {
        FALLBACK_INTENT.to_string()
    } else {
        parts.join(INTENT_SEPARATOR)
    }
}
