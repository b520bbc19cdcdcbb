//! Top-level controller
//!
//! Owns the [`UiState`], the preference store and the advice client. The
//! dark-mode flag is read from the store once, when the controller is built,
//! and written back on every toggle.

use crate::advice::{AdviceClient, AdviceProvider};
use crate::config::UiConfig;
use crate::services::AssessmentService;
use crate::state::{Dropdown, UiState};
use fitness_tracker_shared::preferences::{load_dark_mode, save_dark_mode};
use fitness_tracker_shared::{validate_form, FitnessResult, FormErrors, FormInput, PreferenceStore};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// How long the "calculating" state lasts at minimum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalculationPolicy {
    pub min_duration: Duration,
}

impl CalculationPolicy {
    /// No artificial delay
    pub fn immediate() -> Self {
        Self::default()
    }

    pub fn from_config(config: &UiConfig) -> Self {
        Self {
            min_duration: Duration::from_millis(config.min_calculating_ms),
        }
    }
}

/// Why a submission was not calculated
#[derive(Error, Debug, PartialEq)]
pub enum SubmitError {
    #[error("A calculation is already in progress")]
    Busy,

    #[error("Invalid input: {0}")]
    Invalid(FormErrors),
}

/// Controller for one session
pub struct AppController<S, P> {
    store: S,
    advice: AdviceClient<P>,
    policy: CalculationPolicy,
    state: UiState,
}

impl<S: PreferenceStore, P: AdviceProvider> AppController<S, P> {
    pub fn new(store: S, advice: AdviceClient<P>, policy: CalculationPolicy) -> Self {
        let dark_mode = load_dark_mode(&store);
        debug!(dark_mode, "Loaded theme preference");

        Self {
            store,
            advice,
            policy,
            state: UiState {
                dark_mode,
                ..UiState::default()
            },
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Tear down the controller, handing back its store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Flip dark mode and persist it; returns the new value
    ///
    /// The in-memory flag flips even when the store rejects the write.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.state.dark_mode = !self.state.dark_mode;

        if let Err(e) = save_dark_mode(&mut self.store, self.state.dark_mode) {
            warn!(error = %e, "Failed to persist theme preference");
        }

        self.state.dark_mode
    }

    /// Open `dropdown`, closing any other; closes it if it was already open
    pub fn toggle_dropdown(&mut self, dropdown: Dropdown) {
        self.state.open_dropdown = if self.state.is_dropdown_open(dropdown) {
            None
        } else {
            Some(dropdown)
        };
    }

    pub fn close_dropdowns(&mut self) {
        self.state.open_dropdown = None;
    }

    /// Validate and calculate one submission
    ///
    /// Refused with [`SubmitError::Busy`] while an earlier submission is still
    /// marked in flight. The advice call and the policy's minimum duration run
    /// concurrently, so the call takes whichever is longer.
    pub async fn submit(&mut self, form: &FormInput) -> Result<&FitnessResult, SubmitError> {
        if self.state.is_calculating {
            return Err(SubmitError::Busy);
        }

        let input = validate_form(form).map_err(|errors| {
            debug!(errors = %errors, "Rejected form submission");
            SubmitError::Invalid(errors)
        })?;

        self.state.is_calculating = true;
        self.state.open_dropdown = None;

        let span = info_span!("assessment", id = %Uuid::new_v4());
        let min_duration = self.policy.min_duration;
        let (result, ()) = tokio::join!(
            AssessmentService::assess(&input, &self.advice).instrument(span.clone()),
            hold_for(min_duration),
        );

        span.in_scope(|| info!(suggestions = result.suggestions.len(), "Assessment complete"));

        self.state.is_calculating = false;
        Ok(&*self.state.result.insert(result))
    }

    /// Clear the result and return to the form
    pub fn reset(&mut self) {
        self.state.result = None;
        self.state.is_calculating = false;
    }
}

async fn hold_for(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}
