use async_trait::async_trait;

use super::error::GenerateError;

/// Anything that turns one instruction string into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, instruction: &str) -> Result<String, GenerateError>;
}
