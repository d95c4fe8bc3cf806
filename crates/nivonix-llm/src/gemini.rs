// Gemini-specific client implementation

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use std::time::Duration;

use crate::error::ProviderError;
use crate::generator::ReplyGenerator;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini client (HTTP direct, no SDK)
pub struct GeminiClient {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create new client with API key and a hard request timeout.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: GEMINI_API_BASE.to_string(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl ReplyGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let payload = serde_json::json!({
            "contents": [
                {
                    "parts": [
                        { "text": prompt }
                    ]
                }
            ]
        });

        let response = self
            .http_client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "generate request rejected");
            return Err(ProviderError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        let raw: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedPayload(e.to_string()))?;

        raw.into_text()
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Extract `candidates[0].content.parts[0].text`. Anything missing along
    /// that path is a malformed payload, not an empty reply.
    fn into_text(self) -> Result<String, ProviderError> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| {
                ProviderError::MalformedPayload("response contained no candidate text".to_string())
            })
    }
}
