pub mod annotation;
pub mod error;
pub mod service;

pub use annotation::{annotate_prompt, FileReport};
pub use error::TurnError;
pub use service::{ConversationService, DEFAULT_GENERATION_TIMEOUT};
