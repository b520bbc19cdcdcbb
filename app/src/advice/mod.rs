//! Advice client
//!
//! Sends the computed metrics to a generative-language service and returns the
//! reply as a list of suggestion lines. Every failure is absorbed here and
//! turned into [`AdviceOutcome::Fallback`].

use crate::error::AdviceError;
use async_trait::async_trait;
use fitness_tracker_shared::advice::{build_prompt, split_suggestions};
use fitness_tracker_shared::{AdviceOutcome, AdviceRequest};
use tracing::{debug, instrument, warn};

pub mod gemini;

pub use gemini::GeminiProvider;

/// A service that turns a prompt into a block of text
#[async_trait]
pub trait AdviceProvider: Send + Sync {
    /// Short provider name for logs
    fn name(&self) -> &'static str;

    async fn generate(&self, prompt: &str) -> Result<String, AdviceError>;
}

/// Boundary between the app and the advice provider
pub struct AdviceClient<P> {
    provider: P,
}

impl<P: AdviceProvider> AdviceClient<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetch tips for one assessment; never fails
    #[instrument(skip(self, request), fields(provider = self.provider.name(), language = %request.language))]
    pub async fn fetch(&self, request: &AdviceRequest) -> AdviceOutcome {
        let prompt = build_prompt(request);

        match self.try_fetch(&prompt).await {
            Ok(lines) => {
                debug!(lines = lines.len(), "Received advice");
                AdviceOutcome::Generated(lines)
            }
            Err(e) => {
                warn!(error = %e, auth_failure = e.is_auth_failure(), "Advice unavailable, using fallback");
                AdviceOutcome::Fallback
            }
        }
    }

    async fn try_fetch(&self, prompt: &str) -> Result<Vec<String>, AdviceError> {
        let text = self.provider.generate(prompt).await?;
        let lines = split_suggestions(&text);
        if lines.is_empty() {
            return Err(AdviceError::EmptyResponse);
        }
        Ok(lines)
    }
}
