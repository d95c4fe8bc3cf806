use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("BSON serialization error: {0}")]
    BsonSerialization(#[from] bson::ser::Error),

    #[error("BSON deserialization error: {0}")]
    BsonDeserialization(#[from] bson::de::Error),

    #[error("Thread not found: {0}")]
    ThreadNotFound(String),

    #[error("Thread already exists for this owner: {0}")]
    DuplicateThread(String),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid object ID: {0}")]
    InvalidObjectId(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, PersistError>;

/// True when the server rejected a write because of a unique index (E11000).
pub(crate) fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match *err.kind {
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) => write_error.code == 11000,
        _ => false,
    }
}
