use std::sync::Arc;

use nivonix_persist::{NewUser, PersistError, User, UserStore};

use crate::error::{AuthError, Result};
use crate::federated::FederatedVerifier;
use crate::password::{hash_password, verify_password};
use crate::token::TokenSigner;

/// A verified user plus a freshly-issued session token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

/// The identity gate: every way into the system goes through here.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    signer: TokenSigner,
    verifier: Arc<dyn FederatedVerifier>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        signer: TokenSigner,
        verifier: Arc<dyn FederatedVerifier>,
    ) -> Self {
        Self {
            users,
            signer,
            verifier,
        }
    }

    /// Per-request gate: check signature and expiry, return the user id.
    /// No store access; protected handlers must stay cheap to reject.
    pub fn verify_bearer(&self, token: &str) -> Result<String> {
        Ok(self.signer.verify(token)?.sub)
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthSession> {
        let password_hash = hash_password(password)?;
        let new = NewUser {
            name: name.to_string(),
            email: email.to_string(),
            picture: None,
            google_id: None,
            password_hash: Some(password_hash),
        };

        let user = match self.users.insert(new).await {
            Ok(user) => user,
            Err(PersistError::DuplicateEmail(_)) => return Err(AuthError::EmailTaken),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(email, "user registered");
        self.session_for(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Federated-only accounts carry no hash and cannot password-login.
        let hash = user
            .password_hash
            .as_deref()
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, hash) {
            return Err(AuthError::InvalidCredentials);
        }

        self.session_for(user)
    }

    /// Decode a session token and load its user.
    pub async fn verify(&self, token: &str) -> Result<User> {
        let claims = self.signer.verify(token)?;
        self.users
            .find_by_id(&claims.sub)
            .await?
            .ok_or(AuthError::Unauthenticated)
    }

    /// Verify an externally-issued token, then find-or-create the account.
    ///
    /// When creation loses a duplicate-email race (two tabs signing in at
    /// once), the loser re-fetches and proceeds with the winner's record:
    /// concurrent federated sign-ins must both succeed.
    pub async fn federated_sign_in(&self, id_token: &str) -> Result<AuthSession> {
        let identity = self.verifier.verify(id_token).await?;

        let user = match self.users.find_by_email(&identity.email).await? {
            Some(user) => user,
            None => {
                let name = identity
                    .name
                    .clone()
                    .unwrap_or_else(|| local_part(&identity.email));
                let new = NewUser {
                    name,
                    email: identity.email.clone(),
                    picture: identity.picture.clone(),
                    google_id: Some(identity.subject.clone()),
                    password_hash: None,
                };

                match self.users.insert(new).await {
                    Ok(user) => user,
                    Err(PersistError::DuplicateEmail(_)) => self
                        .users
                        .find_by_email(&identity.email)
                        .await?
                        .ok_or(AuthError::Unauthenticated)?,
                    Err(e) => return Err(e.into()),
                }
            }
        };

        tracing::info!(email = %user.email, "federated sign-in");
        self.session_for(user)
    }

    fn session_for(&self, user: User) -> Result<AuthSession> {
        let token = self.signer.issue(&user.id.to_hex(), &user.email)?;
        Ok(AuthSession { user, token })
    }
}

fn local_part(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}
