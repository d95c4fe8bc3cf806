pub mod error;
pub mod federated;
pub mod password;
pub mod service;
pub mod token;

pub use error::AuthError;
pub use federated::{FederatedIdentity, FederatedVerifier, GoogleVerifier};
pub use service::{AuthService, AuthSession};
pub use token::{Claims, TokenSigner, TOKEN_TTL_DAYS};
