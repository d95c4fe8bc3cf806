use std::sync::Arc;
use std::time::Duration;

use nivonix_llm::{ProviderError, ReplyGenerator};
use nivonix_persist::{MessageRole, PersistError, ThreadStore};

use crate::error::TurnError;

pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Orchestrates one conversation turn:
/// Validating → Resolving Thread → Generating → Persisting → Done.
///
/// Turns for different threads of the same owner run fully in parallel; the
/// store's uniqueness constraint is the only coordination between them.
pub struct ConversationService {
    store: Arc<dyn ThreadStore>,
    generator: Arc<dyn ReplyGenerator>,
    generation_timeout: Duration,
}

impl ConversationService {
    pub fn new(store: Arc<dyn ThreadStore>, generator: Arc<dyn ReplyGenerator>) -> Self {
        Self {
            store,
            generator,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    /// Run one turn and return the assistant's reply.
    pub async fn run_turn(
        &self,
        user_id: &str,
        thread_id: &str,
        message: &str,
    ) -> Result<String, TurnError> {
        // 1. Validate. Nothing touches the store for an empty turn.
        let thread_id = thread_id.trim();
        let message = message.trim();
        if thread_id.is_empty() {
            return Err(TurnError::BadRequest("threadId must not be empty".to_string()));
        }
        if message.is_empty() {
            return Err(TurnError::BadRequest("message must not be empty".to_string()));
        }

        // 2. Resolve the thread by persisting the user's message.
        self.persist_user_message(user_id, thread_id, message).await?;

        // 3. Generate. On failure the turn is abandoned: the user's message
        // stays persisted and no assistant message is appended.
        let reply = match tokio::time::timeout(
            self.generation_timeout,
            self.generator.generate(message),
        )
        .await
        {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => {
                tracing::warn!(user_id, thread_id, error = %e, "generation failed");
                return Err(TurnError::Provider(e));
            }
            Err(_) => {
                tracing::warn!(user_id, thread_id, "generation timed out");
                return Err(TurnError::Provider(ProviderError::Timeout(
                    self.generation_timeout.as_secs(),
                )));
            }
        };

        // 4. Persist the assistant reply. If this append fails the reply is
        // still returned once; a caller that never saw it has no way to ask
        // for persistence without re-generating, so log the loss instead of
        // retry-looping the model call.
        if let Err(e) = self
            .store
            .append(user_id, thread_id, MessageRole::Assistant, &reply)
            .await
        {
            tracing::error!(
                user_id,
                thread_id,
                error = %e,
                "assistant reply generated but not persisted"
            );
        }

        Ok(reply)
    }

    async fn persist_user_message(
        &self,
        user_id: &str,
        thread_id: &str,
        text: &str,
    ) -> Result<(), TurnError> {
        match self
            .store
            .create_or_append(user_id, thread_id, MessageRole::User, text)
            .await
        {
            Ok(()) => Ok(()),
            // Lost the creation race, so the thread exists now. One retry as
            // a plain append.
            Err(PersistError::DuplicateThread(_)) => {
                tracing::debug!(user_id, thread_id, "creation race lost, appending");
                self.store
                    .append(user_id, thread_id, MessageRole::User, text)
                    .await
                    .map_err(|e| TurnError::StoreUnavailable(e.to_string()))
            }
            Err(e) => Err(TurnError::StoreUnavailable(e.to_string())),
        }
    }
}
