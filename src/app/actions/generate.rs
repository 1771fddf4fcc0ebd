//! Starting a draft and applying the AI actor's result

use crate::ai::{AiCommand, AiEvent};
use crate::app::state::FormField;

use super::super::App;

impl App {
    /// Validate the form and hand the request to the AI actor
    pub(crate) async fn start_generation(&mut self) {
        if self.state.is_busy() {
            self.state.set_status("Still drafting, please wait...");
            return;
        }

        let request = match self.state.form.collect() {
            Ok(request) => request,
            Err(e) => {
                self.state.set_warning(e);
                return;
            }
        };

        tracing::info!(
            "Requesting draft: {} intent(s), custom intent: {}",
            request.selected_intents().len(),
            request.custom_intent().is_some()
        );

        // A new request replaces the previous draft
        self.state.form.clear_output();
        self.state.status.busy = true;
        self.state.set_status("Drafting a reply...");
        self.dirty = true;

        if self
            .ai_actor
            .cmd_tx
            .send(AiCommand::Generate(request))
            .await
            .is_err()
        {
            tracing::error!("AI actor is not running");
            self.state.status.busy = false;
            self.state.set_error("Generation failed: AI worker stopped");
        }
    }

    pub(crate) fn handle_ai_event(&mut self, event: AiEvent) {
        self.state.status.busy = false;
        match event {
            AiEvent::Generated { text } => {
                tracing::info!("Draft ready ({} bytes)", text.len());
                self.state.form.set_output(text);
                self.state.form.field = FormField::Output;
                self.state.set_status("Done! Edit the draft, then quit to print it");
            }
            AiEvent::Failed { error } => {
                self.state.form.clear_output();
                self.state.set_error(error);
                self.state.set_status("");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::ai::GenerateError;
    use crate::ai::fake::FakeGenerator;
    use crate::app::App;
    use crate::app::state::{AlertLevel, FormField};
    use crate::reply::Intent;

    /// Wait for the actor's reply and apply it, as the event loop would
    async fn settle(app: &mut App) {
        let event = app
            .ai_actor
            .event_rx
            .recv()
            .await
            .expect("actor stopped");
        app.handle_ai_event(event);
    }

    #[tokio::test]
    async fn test_empty_message_warns_without_calling_service() {
        let generator = FakeGenerator::replying("unused");
        let mut app = App::new(generator.clone());

        app.start_generation().await;

        assert_eq!(generator.call_count(), 0);
        assert!(!app.state.is_busy());
        let alert = app.state.status.alert.clone().unwrap();
        assert_eq!(alert.level, AlertLevel::Warning);
        assert_eq!(alert.text, "Please paste the message you want to reply to.");
    }

    #[tokio::test]
    async fn test_successful_generation_fills_output() {
        let reply = "Thank you for letting me know! See you soon.";
        let generator = FakeGenerator::replying(reply);
        let mut app = App::new(generator.clone());
        app.state.form.message = "We will be a few minutes late today.".to_string();
        app.state.form.flags.toggle(Intent::Thanks);

        app.start_generation().await;
        assert!(app.state.is_busy());
        settle(&mut app).await;

        assert_eq!(app.state.form.output, reply);
        assert_eq!(app.state.form.field, FormField::Output);
        assert!(!app.state.is_busy());
        assert_eq!(generator.call_count(), 1);

        let instruction = generator.last_instruction().unwrap();
        assert!(instruction.contains("We will be a few minutes late today."));
        assert!(instruction.contains("express ongoing gratitude"));
    }

    #[tokio::test]
    async fn test_failure_clears_stale_output() {
        let generator = FakeGenerator::failing(GenerateError::Api {
            status: 403,
            message: "API key not valid".to_string(),
        });
        let mut app = App::new(generator);
        app.state.form.message = "Is there class on Monday?".to_string();
        app.state.form.set_output("old draft".to_string());

        app.start_generation().await;
        assert_eq!(app.state.form.output, "");
        settle(&mut app).await;

        assert_eq!(app.state.form.output, "");
        let alert = app.state.status.alert.clone().unwrap();
        assert_eq!(alert.level, AlertLevel::Error);
        assert!(alert.text.starts_with("Generation failed:"), "{}", alert.text);
        assert!(alert.text.contains("API key not valid"), "{}", alert.text);
    }

    #[tokio::test]
    async fn test_generate_ignored_while_busy() {
        let generator = FakeGenerator::replying("first");
        let mut app = App::new(generator.clone());
        app.state.form.message = "Hello".to_string();

        app.start_generation().await;
        app.start_generation().await;
        settle(&mut app).await;

        assert_eq!(generator.call_count(), 1);
        assert!(app.ai_actor.event_rx.try_recv().is_err());
    }
}
