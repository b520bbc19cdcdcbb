//! Application state management
//!
//! All UI state lives in one [`UiState`] value owned by the
//! [`AppController`](crate::controller::AppController). Views read it; only
//! the controller changes it.

use fitness_tracker_shared::FitnessResult;

/// Dropdown widgets on the assessment form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dropdown {
    HeightUnit,
    ActivityLevel,
    Language,
}

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Form,
    Result,
}

/// UI state for one session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub dark_mode: bool,
    /// At most one dropdown is open at a time
    pub open_dropdown: Option<Dropdown>,
    /// Set while a submission is being calculated
    pub is_calculating: bool,
    pub result: Option<FitnessResult>,
}

impl UiState {
    pub fn is_dropdown_open(&self, dropdown: Dropdown) -> bool {
        self.open_dropdown == Some(dropdown)
    }

    pub fn view(&self) -> View {
        if self.result.is_some() {
            View::Result
        } else {
            View::Form
        }
    }
}
