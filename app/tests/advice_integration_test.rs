//! Integration tests for the advice client against a mock Gemini API

mod common;

use common::MockGemini;
use fitness_tracker_app::advice::AdviceProvider;
use fitness_tracker_app::error::AdviceError;
use fitness_tracker_shared::{
    ActivityLevel, AdviceOutcome, AdviceRequest, BmiCategory, FALLBACK_SUGGESTION,
};
use rstest::rstest;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, method};
use wiremock::{Mock, ResponseTemplate};

fn request(language: &str) -> AdviceRequest {
    AdviceRequest {
        bmi: 31.2,
        category: BmiCategory::Obese,
        activity_level: ActivityLevel::LightlyActive,
        language: language.to_string(),
    }
}

fn assert_fallback(outcome: AdviceOutcome) {
    assert!(outcome.is_fallback());
    let suggestions = outcome.into_suggestions();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0], FALLBACK_SUGGESTION);
}

#[tokio::test]
async fn test_reply_lines_returned_in_order() {
    let gemini = MockGemini::start().await;
    gemini
        .reply_with_text("1. Take a brisk walk.\n\n\n2. Swap soda for water.\n   \n3. Sleep 7-8 hours.\n")
        .await;

    let outcome = gemini.client().fetch(&request("English")).await;

    assert_eq!(
        outcome.into_suggestions(),
        vec![
            "1. Take a brisk walk.",
            "2. Swap soda for water.",
            "3. Sleep 7-8 hours."
        ]
    );
}

#[tokio::test]
async fn test_prompt_sent_with_metrics_and_language() {
    let gemini = MockGemini::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("BMI: 31.2"))
        .and(body_string_contains("Category: Obese"))
        .and(body_string_contains("Activity Level: Lightly Active"))
        .and(body_string_contains("Respond only in Hindi."))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::candidate_body("टिप")))
        .expect(1)
        .mount(&gemini.server)
        .await;

    let outcome = gemini.client().fetch(&request("Hindi")).await;

    assert_eq!(outcome, AdviceOutcome::Generated(vec!["टिप".to_string()]));
}

#[rstest]
#[case::invalid_key(400, "API key not valid. Please pass a valid API key.")]
#[case::forbidden(403, "Permission denied.")]
#[case::rate_limited(429, "Resource has been exhausted.")]
#[case::overloaded(503, "The model is overloaded.")]
#[tokio::test]
async fn test_error_status_falls_back(#[case] status: u16, #[case] message: &str) {
    let gemini = MockGemini::start().await;
    gemini.reply_with_error(status, message).await;

    let client = gemini.client();
    let err = client.provider().generate("hello").await.unwrap_err();
    assert!(matches!(err, AdviceError::Api { status: s, .. } if s == status));

    assert_fallback(client.fetch(&request("English")).await);
}

#[tokio::test]
async fn test_malformed_body_falls_back() {
    let gemini = MockGemini::start().await;
    gemini.reply_with_raw(200, "<html>not json</html>").await;

    assert_fallback(gemini.client().fetch(&request("English")).await);
}

#[tokio::test]
async fn test_empty_candidates_fall_back() {
    let gemini = MockGemini::start().await;
    gemini.reply_with_raw(200, r#"{"candidates":[]}"#).await;

    assert_fallback(gemini.client().fetch(&request("English")).await);
}

#[tokio::test]
async fn test_missing_key_falls_back_without_request() {
    let gemini = MockGemini::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&gemini.server)
        .await;

    let mut config = gemini.config();
    config.api_key = None;

    assert_fallback(common::client_for(&config).fetch(&request("English")).await);
}

#[tokio::test]
async fn test_timeout_is_a_transport_failure() {
    let gemini = MockGemini::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::candidate_body("too late"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&gemini.server)
        .await;

    let mut config = gemini.config();
    config.timeout_secs = 1;
    let client = common::client_for(&config);

    let err = client.provider().generate("hello").await.unwrap_err();
    assert!(matches!(err, AdviceError::Transport(_)));

    assert_fallback(client.fetch(&request("English")).await);
}

#[tokio::test]
async fn test_unreachable_service_falls_back() {
    let mut config = MockGemini::start().await.config();
    // Port 9 (discard) on localhost is not listening in test environments
    config.base_url = "http://127.0.0.1:9".to_string();

    assert_fallback(common::client_for(&config).fetch(&request("English")).await);
}
