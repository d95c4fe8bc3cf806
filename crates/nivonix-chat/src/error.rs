use nivonix_llm::ProviderError;
use thiserror::Error;

/// How a turn can fail. Internal races (`DuplicateThread`) are recovered
/// before this type is ever constructed; they never reach the caller.
#[derive(Error, Debug)]
pub enum TurnError {
    /// Empty identifier or message. Rejected before any side effect.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// The external generator failed or timed out. The user's message stays
    /// persisted; the client may retry the turn without re-sending it.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Persistence layer unreachable, or the creation-race retry exhausted.
    #[error("Storage unavailable: {0}")]
    StoreUnavailable(String),
}
