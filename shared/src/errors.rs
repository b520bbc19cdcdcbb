//! Error types shared by every host of the fitness tracker

use thiserror::Error;

/// Preference store errors
#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("Failed to write preferences: {0}")]
    Write(String),

    #[error("Failed to encode preferences: {0}")]
    Encoding(String),
}
