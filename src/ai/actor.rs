//! AI actor that runs reply generation off the UI loop

use tokio::sync::mpsc;

use super::generator::TextGenerator;
use crate::reply::{ReplyComposer, ReplyRequest};

/// Commands that can be sent to the AI actor
#[derive(Debug)]
pub enum AiCommand {
    /// Draft a reply for this request
    Generate(ReplyRequest),
    /// Shutdown the actor
    Shutdown,
}

/// Events emitted by the AI actor
#[derive(Debug, Clone)]
pub enum AiEvent {
    /// Draft completed
    Generated { text: String },
    /// The service call failed
    Failed { error: String },
}

/// Handle for communicating with the AI actor
pub struct AiActorHandle {
    pub cmd_tx: mpsc::Sender<AiCommand>,
    pub event_rx: mpsc::Receiver<AiEvent>,
}

/// Spawn the AI actor task
pub fn spawn_ai_actor<G>(composer: ReplyComposer<G>) -> AiActorHandle
where
    G: TextGenerator + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel(4);
    let (event_tx, event_rx) = mpsc::channel(4);

    tokio::spawn(ai_actor_loop(composer, cmd_rx, event_tx));

    AiActorHandle { cmd_tx, event_rx }
}

async fn ai_actor_loop<G: TextGenerator>(
    composer: ReplyComposer<G>,
    mut cmd_rx: mpsc::Receiver<AiCommand>,
    event_tx: mpsc::Sender<AiEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            AiCommand::Generate(request) => {
                let event = match composer.compose(&request).await {
                    Ok(text) => AiEvent::Generated { text },
                    Err(e) => {
                        tracing::error!("Reply generation failed: {}", e);
                        AiEvent::Failed {
                            error: e.to_string(),
                        }
                    }
                };
                if event_tx.send(event).await.is_err() {
                    tracing::warn!("AI actor: event receiver dropped");
                    break;
                }
            }

            AiCommand::Shutdown => {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::GenerateError;
    use crate::ai::fake::FakeGenerator;
    use crate::reply::IntentFlags;

    #[tokio::test]
    async fn test_generate_emits_text() {
        let generator = FakeGenerator::replying("See you on Monday!");
        let mut handle = spawn_ai_actor(ReplyComposer::new(generator.clone()));

        let request = ReplyRequest::new("Is class on?", IntentFlags::default(), "").unwrap();
        handle.cmd_tx.send(AiCommand::Generate(request)).await.unwrap();

        match handle.event_rx.recv().await {
            Some(AiEvent::Generated { text }) => assert_eq!(text, "See you on Monday!"),
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_is_reported_as_event() {
        let generator = FakeGenerator::failing(GenerateError::Api {
            status: 429,
            message: "quota exceeded".to_string(),
        });
        let mut handle = spawn_ai_actor(ReplyComposer::new(generator.clone()));

        let request = ReplyRequest::new("Is class on?", IntentFlags::default(), "").unwrap();
        handle.cmd_tx.send(AiCommand::Generate(request)).await.unwrap();

        match handle.event_rx.recv().await {
            Some(AiEvent::Failed { error }) => {
                assert!(error.contains("quota exceeded"), "{}", error);
                assert!(error.starts_with("Generation failed"), "{}", error);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_shutdown_closes_event_channel() {
        let generator = FakeGenerator::replying("unused");
        let mut handle = spawn_ai_actor(ReplyComposer::new(generator.clone()));

        handle.cmd_tx.send(AiCommand::Shutdown).await.unwrap();
        assert!(handle.event_rx.recv().await.is_none());
        assert_eq!(generator.call_count(), 0);
    }
}
