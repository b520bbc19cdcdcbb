//! Common test utilities for integration tests
//!
//! Provides a mock Gemini server and configuration pointing at it.

#![allow(dead_code)]

use fitness_tracker_app::advice::{AdviceClient, GeminiProvider};
use fitness_tracker_app::config::AdviceConfig;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_MODEL: &str = "gemini-1.5-flash";

/// Mock Gemini API
pub struct MockGemini {
    pub server: MockServer,
}

impl MockGemini {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn endpoint_path() -> String {
        format!("/models/{}:generateContent", TEST_MODEL)
    }

    /// Reply with `text` as the first candidate
    pub async fn reply_with_text(&self, text: &str) {
        Mock::given(method("POST"))
            .and(path(Self::endpoint_path()))
            .and(query_param("key", TEST_API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body(text)))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Reply with an error status and a Gemini-style error body
    pub async fn reply_with_error(&self, status: u16, message: &str) {
        Mock::given(method("POST"))
            .and(path(Self::endpoint_path()))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": { "code": status, "message": message, "status": "ERROR" }
            })))
            .expect(1..)
            .mount(&self.server)
            .await;
    }

    pub async fn reply_with_raw(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(Self::endpoint_path()))
            .respond_with(ResponseTemplate::new(status).set_body_string(body.to_string()))
            .mount(&self.server)
            .await;
    }

    pub fn config(&self) -> AdviceConfig {
        AdviceConfig {
            api_key: Some(TEST_API_KEY.to_string()),
            base_url: self.server.uri(),
            model: TEST_MODEL.to_string(),
            timeout_secs: 20,
        }
    }

    pub fn client(&self) -> AdviceClient<GeminiProvider> {
        client_for(&self.config())
    }
}

pub fn client_for(config: &AdviceConfig) -> AdviceClient<GeminiProvider> {
    AdviceClient::new(GeminiProvider::new(config).expect("Failed to build provider"))
}

pub fn candidate_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 40, "candidatesTokenCount": 30, "totalTokenCount": 70 }
    })
}
