//! Google Gemini advice provider
//!
//! Calls the `generateContent` endpoint of the Generative Language API with a
//! single user turn and returns the text of the first candidate.

use super::AdviceProvider;
use crate::config::AdviceConfig;
use crate::error::{AdviceError, AppError, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, error};

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini advice provider
pub struct GeminiProvider {
    api_key: Option<SecretString>,
    base_url: String,
    model: String,
    client: Client,
}

impl GeminiProvider {
    /// Build a provider from configuration
    ///
    /// A missing API key is accepted here; each call then fails with
    /// [`AdviceError::MissingCredential`] without touching the network.
    pub fn new(config: &AdviceConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key: config.api_key.clone().map(SecretString::new),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            client,
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Concatenate the text parts of the first candidate
    fn extract_text(response: GenerateContentResponse) -> Result<String, AdviceError> {
        let parts = response
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts)
            .ok_or_else(|| AdviceError::InvalidResponse("no candidates in response".to_string()))?;

        let text: String = parts.into_iter().filter_map(|part| part.text).collect();
        if text.trim().is_empty() {
            return Err(AdviceError::EmptyResponse);
        }
        Ok(text)
    }

    /// Pull the service's own message out of an error body when there is one
    fn map_api_error(status: u16, body: &str) -> AdviceError {
        let message = serde_json::from_str::<GenerateContentResponse>(body)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| body.to_string(), |e| e.message);

        AdviceError::Api { status, message }
    }
}

#[async_trait]
impl AdviceProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, AdviceError> {
        let api_key = self.api_key.as_ref().ok_or(AdviceError::MissingCredential)?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        debug!(model = %self.model, "Sending request to Gemini API");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key.expose_secret().as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &text));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| AdviceError::InvalidResponse(e.to_string()))?;

        if let Some(err) = parsed.error {
            return Err(AdviceError::Api {
                status: status.as_u16(),
                message: err.message,
            });
        }

        Self::extract_text(parsed)
    }
}

impl fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"Tip one\n"},{"text":"Tip two"}],"role":"model"}}]}"#,
        );
        assert_eq!(
            GeminiProvider::extract_text(response).unwrap(),
            "Tip one\nTip two"
        );
    }

    #[test]
    fn test_extract_text_without_candidates() {
        let err = GeminiProvider::extract_text(parse(r#"{"candidates":[]}"#)).unwrap_err();
        assert!(matches!(err, AdviceError::InvalidResponse(_)));
    }

    #[test]
    fn test_extract_text_blank() {
        let response = parse(r#"{"candidates":[{"content":{"parts":[{"text":"  \n"}]}}]}"#);
        assert!(matches!(
            GeminiProvider::extract_text(response),
            Err(AdviceError::EmptyResponse)
        ));
    }

    #[test]
    fn test_map_api_error_uses_service_message() {
        let err = GeminiProvider::map_api_error(
            400,
            r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#,
        );
        match err {
            AdviceError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_map_api_error_plain_body() {
        let err = GeminiProvider::map_api_error(502, "Bad Gateway");
        assert_eq!(err.to_string(), "Advice service error (502): Bad Gateway");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AdviceConfig {
            api_key: Some("secret-key".to_string()),
            ..AdviceConfig::default()
        };
        let provider = GeminiProvider::new(&config).unwrap();
        assert!(provider.has_credential());
        assert!(!format!("{:?}", provider).contains("secret-key"));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_request() {
        let config = AdviceConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..AdviceConfig::default()
        };
        let provider = GeminiProvider::new(&config).unwrap();
        let err = provider.generate("hello").await.unwrap_err();
        assert!(matches!(err, AdviceError::MissingCredential));
    }
}
