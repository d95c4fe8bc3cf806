use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{AuthError, Result};

const GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

const TOKENINFO_TIMEOUT: Duration = Duration::from_secs(10);

/// What a trusted external issuer attests about the account signing in.
#[derive(Debug, Clone)]
pub struct FederatedIdentity {
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
    /// The issuer's stable id for this account (`sub`).
    pub subject: String,
}

/// Trait for verifying an externally-issued identity token.
///
/// Used at sign-up/sign-in only; per-request authentication is always the
/// self-issued session token.
#[async_trait]
pub trait FederatedVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<FederatedIdentity>;
}

/// Verifies Google ID tokens against the tokeninfo endpoint and the
/// configured OAuth client id.
pub struct GoogleVerifier {
    http_client: reqwest::Client,
    client_id: String,
    endpoint: String,
}

impl GoogleVerifier {
    pub fn new(client_id: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(TOKENINFO_TIMEOUT)
            .build()
            .map_err(|e| AuthError::Federated(e.to_string()))?;

        Ok(Self {
            http_client,
            client_id: client_id.into(),
            endpoint: GOOGLE_TOKENINFO_URL.to_string(),
        })
    }
}

#[async_trait]
impl FederatedVerifier for GoogleVerifier {
    async fn verify(&self, id_token: &str) -> Result<FederatedIdentity> {
        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| AuthError::Federated(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::Federated(format!(
                "tokeninfo returned {}",
                response.status()
            )));
        }

        let info: TokenInfo = response
            .json()
            .await
            .map_err(|e| AuthError::Federated(e.to_string()))?;

        if info.aud != self.client_id {
            tracing::warn!("federated token audience mismatch");
            return Err(AuthError::Federated("token audience mismatch".to_string()));
        }

        Ok(FederatedIdentity {
            email: info.email,
            name: info.name,
            picture: info.picture,
            subject: info.sub,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    sub: String,
    email: String,
    name: Option<String>,
    picture: Option<String>,
}
