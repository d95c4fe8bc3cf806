use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A registered account. Created on first registration or first federated
/// sign-in; never deleted by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    /// Argon2 hash. Absent for accounts that only sign in federated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating a user; the store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub picture: Option<String>,
    pub google_id: Option<String>,
    pub password_hash: Option<String>,
}

impl User {
    pub fn from_new(new: NewUser) -> Self {
        Self {
            id: ObjectId::new(),
            name: new.name,
            email: new.email,
            picture: new.picture,
            google_id: new.google_id,
            password_hash: new.password_hash,
            created_at: Utc::now(),
        }
    }
}
