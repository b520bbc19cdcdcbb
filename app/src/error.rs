//! Application error handling
//!
//! [`AdviceError`] describes why the advice service could not be used. It never
//! leaves the advice client: callers only ever see an
//! [`AdviceOutcome`](fitness_tracker_shared::AdviceOutcome).

use thiserror::Error;

/// Advice service failures
#[derive(Error, Debug)]
pub enum AdviceError {
    #[error("No API key configured for the advice service")]
    MissingCredential,

    #[error("Advice request failed: {0}")]
    Transport(String),

    #[error("Advice service error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid advice response: {0}")]
    InvalidResponse(String),

    #[error("Advice service returned no text")]
    EmptyResponse,
}

impl AdviceError {
    /// Whether the failure came from a rejected or missing credential
    pub fn is_auth_failure(&self) -> bool {
        match self {
            AdviceError::MissingCredential => true,
            AdviceError::Api { status, .. } => matches!(status, 401 | 403),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for AdviceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AdviceError::Transport(format!("request timed out: {}", err))
        } else {
            AdviceError::Transport(err.to_string())
        }
    }
}

/// Application-level errors outside the advice boundary
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
