use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Client, Collection, IndexModel};

use crate::error::{is_duplicate_key, PersistError, Result};
use crate::models::{Message, MessageRole, Thread, ThreadSummary};
use crate::store::ThreadStore;

#[derive(Clone)]
pub struct ThreadRepository {
    collection: Collection<Thread>,
}

impl ThreadRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("threads");
        Self { collection }
    }

    /// Create the unique compound index on (user_id, thread_id).
    ///
    /// This index is what makes `create_or_append` race-safe; without it two
    /// concurrent first turns could both insert.
    pub async fn ensure_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "thread_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl ThreadStore for ThreadRepository {
    async fn create_or_append(
        &self,
        user_id: &str,
        thread_id: &str,
        role: MessageRole,
        text: &str,
    ) -> Result<()> {
        // Fast path: the thread already exists and takes the append.
        match self.append(user_id, thread_id, role, text).await {
            Ok(()) => return Ok(()),
            Err(PersistError::ThreadNotFound(_)) => {}
            Err(e) => return Err(e),
        }

        let thread = Thread::new(user_id, thread_id, Message::new(role, text));
        match self.collection.insert_one(&thread).await {
            Ok(_) => {
                tracing::debug!(user_id, thread_id, "created thread");
                Ok(())
            }
            // Lost the creation race against a concurrent first turn.
            Err(e) if is_duplicate_key(&e) => {
                Err(PersistError::DuplicateThread(thread_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn append(
        &self,
        user_id: &str,
        thread_id: &str,
        role: MessageRole,
        text: &str,
    ) -> Result<()> {
        let message = Message::new(role, text);
        let filter = doc! { "user_id": user_id, "thread_id": thread_id };
        let update = doc! {
            "$push": { "messages": bson::to_bson(&message)? },
            "$set": { "updated_at": bson::DateTime::now() },
        };

        let result = self.collection.update_one(filter, update).await?;
        if result.matched_count == 0 {
            return Err(PersistError::ThreadNotFound(thread_id.to_string()));
        }
        Ok(())
    }

    async fn list(&self, user_id: &str) -> Result<Vec<ThreadSummary>> {
        let filter = doc! { "user_id": user_id };
        let summaries = self
            .collection
            .clone_with_type::<ThreadSummary>()
            .find(filter)
            .projection(doc! { "thread_id": 1, "title": 1, "updated_at": 1 })
            .sort(doc! { "updated_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(summaries)
    }

    async fn fetch_messages(&self, user_id: &str, thread_id: &str) -> Result<Vec<Message>> {
        let filter = doc! { "user_id": user_id, "thread_id": thread_id };
        let thread = self
            .collection
            .find_one(filter)
            .await?
            .ok_or_else(|| PersistError::ThreadNotFound(thread_id.to_string()))?;
        Ok(thread.messages)
    }

    async fn delete(&self, user_id: &str, thread_id: &str) -> Result<()> {
        let filter = doc! { "user_id": user_id, "thread_id": thread_id };
        let result = self.collection.delete_one(filter).await?;
        if result.deleted_count == 0 {
            return Err(PersistError::ThreadNotFound(thread_id.to_string()));
        }
        tracing::debug!(user_id, thread_id, "deleted thread");
        Ok(())
    }
}
