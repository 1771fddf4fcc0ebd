//! Turns a `ReplyRequest` into generated reply text

use super::error::ReplyError;
use super::prompt::build_instruction;
use super::request::ReplyRequest;
use crate::ai::TextGenerator;

pub struct ReplyComposer<G> {
    generator: G,
}

impl<G: TextGenerator> ReplyComposer<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Build the instruction and make exactly one service call.
    ///
    /// The generated text is returned untouched. Failures are not retried.
    pub async fn compose(&self, request: &ReplyRequest) -> Result<String, ReplyError> {
        let instruction = build_instruction(request);
        tracing::debug!(
            intents = request.selected_intents().len(),
            custom = request.custom_intent().is_some(),
            instruction_bytes = instruction.len(),
            "Requesting reply draft"
        );

        let text = self.generator.generate(&instruction).await?;
        tracing::debug!(reply_bytes = text.len(), "Reply draft received");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::GenerateError;
    use crate::ai::fake::FakeGenerator;
    use crate::reply::IntentFlags;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_returns_generated_text_unchanged() {
        let reply = "Thank you for letting me know! ...";
        let generator = FakeGenerator::replying(reply);
        let composer = ReplyComposer::new(generator.clone());

        let flags = IntentFlags {
            thanks: true,
            ..Default::default()
        };
        let request =
            ReplyRequest::new("We will be a few minutes late today.", flags, "").unwrap();

        let text = composer.compose(&request).await.unwrap();
        assert_eq!(text, reply);
        assert_eq!(generator.call_count(), 1);

        let sent = generator.last_instruction().unwrap();
        assert!(sent.contains("We will be a few minutes late today."));
        assert!(sent.contains("express ongoing gratitude"));
    }

    #[tokio::test]
    async fn test_whitespace_in_reply_is_preserved() {
        let reply = "\n  Dear Mrs. Sato,\n\nSee you!\n\n";
        let generator = FakeGenerator::replying(reply);
        let composer = ReplyComposer::new(generator);

        let request = ReplyRequest::new("Hi", IntentFlags::default(), "").unwrap();
        assert_eq!(composer.compose(&request).await.unwrap(), reply);
    }

    #[tokio::test]
    async fn test_failure_is_reported_without_retry() {
        let generator = FakeGenerator::failing(GenerateError::Api {
            status: 403,
            message: "API key not valid".to_string(),
        });
        let composer = ReplyComposer::new(generator.clone());

        let request = ReplyRequest::new("Hi", IntentFlags::default(), "").unwrap();
        let err = composer.compose(&request).await.unwrap_err();

        assert!(matches!(err, ReplyError::Service(_)));
        assert!(err.to_string().contains("API key not valid"));
        assert_eq!(generator.call_count(), 1);
    }
}
