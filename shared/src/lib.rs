//! Fitness Tracker Shared Library
//!
//! This crate contains the pure core used by the terminal app and the WASM
//! module: unit handling, the metric calculator, form validation, advice
//! prompt handling, and the preference store abstraction.

pub mod advice;
pub mod errors;
pub mod health_metrics;
pub mod models;
pub mod preferences;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use advice::{AdviceOutcome, AdviceRequest, FALLBACK_SUGGESTION};
pub use errors::*;
pub use health_metrics::*;
pub use models::*;
pub use preferences::{MemoryStore, PreferenceStore, DARK_MODE_KEY};
pub use units::*;
pub use validation::{validate_form, FormErrors, FormInput};
