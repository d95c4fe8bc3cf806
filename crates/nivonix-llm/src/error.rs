use thiserror::Error;

/// Failure of the external reply generator. One attempt per turn; the caller
/// decides whether to retry the whole turn.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Provider returned {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("Malformed provider payload: {0}")]
    MalformedPayload(String),

    #[error("Provider timed out after {0}s")]
    Timeout(u64),
}
