use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    Client, Collection, IndexModel,
};

use crate::error::{is_duplicate_key, PersistError, Result};
use crate::models::{NewUser, User};
use crate::store::UserStore;

#[derive(Clone)]
pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("users");
        Self { collection }
    }

    /// Create the unique index on email.
    pub async fn ensure_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn insert(&self, new: NewUser) -> Result<User> {
        let user = User::from_new(new);
        match self.collection.insert_one(&user).await {
            Ok(_) => {
                tracing::debug!(email = %user.email, "created user");
                Ok(user)
            }
            Err(e) if is_duplicate_key(&e) => Err(PersistError::DuplicateEmail(user.email)),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| PersistError::InvalidObjectId(id.to_string()))?;
        Ok(self.collection.find_one(doc! { "_id": object_id }).await?)
    }
}
