use mongodb::Client;

use crate::error::{PersistError, Result};
use crate::repositories::{ThreadRepository, UserRepository};

/// Bundles the thread and user repositories behind one MongoDB connection.
pub struct PersistClient {
    thread_repo: ThreadRepository,
    user_repo: UserRepository,
}

impl PersistClient {
    pub async fn new(mongodb_uri: &str, db_name: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        let thread_repo = ThreadRepository::new(&client, db_name);
        let user_repo = UserRepository::new(&client, db_name);

        Ok(Self {
            thread_repo,
            user_repo,
        })
    }

    /// Create the unique indexes both repositories rely on. Call at startup,
    /// before serving requests.
    pub async fn ensure_indexes(&self) -> Result<()> {
        self.thread_repo.ensure_indexes().await?;
        self.user_repo.ensure_indexes().await?;
        Ok(())
    }

    pub fn threads(&self) -> &ThreadRepository {
        &self.thread_repo
    }

    pub fn users(&self) -> &UserRepository {
        &self.user_repo
    }
}
