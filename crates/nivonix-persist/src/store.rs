use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Message, MessageRole, NewUser, ThreadSummary, User};

/// Trait for abstracting thread storage operations.
///
/// The uniqueness of (owner, thread_id) is the store's concurrency-control
/// primitive: `create_or_append` must be backed by a hard constraint, not a
/// check-then-write, so the loser of a creation race observes
/// `PersistError::DuplicateThread` and the caller can retry as an append.
#[async_trait]
pub trait ThreadStore: Send + Sync {
    /// Append to an existing thread, or create it with a derived title when
    /// no thread exists for (owner, thread_id).
    async fn create_or_append(
        &self,
        user_id: &str,
        thread_id: &str,
        role: MessageRole,
        text: &str,
    ) -> Result<()>;

    /// Append to an existing thread, bumping `updated_at`.
    /// Fails with `ThreadNotFound` when no thread matches (owner, thread_id).
    async fn append(
        &self,
        user_id: &str,
        thread_id: &str,
        role: MessageRole,
        text: &str,
    ) -> Result<()>;

    /// Summaries for all of an owner's threads, newest `updated_at` first.
    async fn list(&self, user_id: &str) -> Result<Vec<ThreadSummary>>;

    /// The full ordered message log of one thread. A thread owned by someone
    /// else behaves exactly like a nonexistent one.
    async fn fetch_messages(&self, user_id: &str, thread_id: &str) -> Result<Vec<Message>>;

    /// Remove a thread and all its messages. All-or-nothing.
    async fn delete(&self, user_id: &str, thread_id: &str) -> Result<()>;
}

/// Trait for abstracting user account storage.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new account. Fails with `DuplicateEmail` when the unique
    /// email constraint rejects the write.
    async fn insert(&self, new: NewUser) -> Result<User>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;
}
