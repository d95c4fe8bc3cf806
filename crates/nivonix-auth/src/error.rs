use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Missing, malformed, expired, or otherwise unverifiable credential.
    #[error("Missing or invalid credential")]
    Unauthenticated,

    /// Unknown email or wrong password. Deliberately the same error for both.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Federated verification failed: {0}")]
    Federated(String),

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Token encoding failed: {0}")]
    Token(String),

    #[error("Persistence error: {0}")]
    Persist(#[from] nivonix_persist::PersistError),
}

pub type Result<T> = std::result::Result<T, AuthError>;
