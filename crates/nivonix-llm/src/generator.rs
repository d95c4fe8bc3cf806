use async_trait::async_trait;

use crate::error::ProviderError;

/// Trait for the external reply generator.
///
/// The core hands over the raw user text and gets back a complete reply; it
/// does not inspect or transform the prompt. Implementations make a single
/// attempt, with no retry loop around the model call.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}
