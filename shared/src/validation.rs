//! Input validation functions
//!
//! The calculator assumes well-formed positive numbers, so raw form input is
//! checked here first. Every field is checked on each submission and all
//! failures are reported together, keyed by field.

use crate::health_metrics::ActivityLevel;
use crate::models::{MeasurementInput, DEFAULT_LANGUAGE};
use crate::units::HeightUnit;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const WEIGHT_ERROR: &str = "Please enter a valid weight";
pub const HEIGHT_ERROR: &str = "Please enter a valid height";
pub const ACTIVITY_LEVEL_ERROR: &str = "Please select an activity level";

/// Raw form fields exactly as typed or selected by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    pub weight: String,
    pub height: String,
    pub height_unit: String,
    pub activity_level: String,
    pub language: String,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            weight: String::new(),
            height: String::new(),
            height_unit: "cm".to_string(),
            activity_level: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Per-field validation messages; `None` means the field is fine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<String>,
}

impl FormErrors {
    /// `(field, message)` pairs in form order
    pub fn messages(&self) -> Vec<(&'static str, &str)> {
        [
            ("weight", self.weight.as_deref()),
            ("height", self.height.as_deref()),
            ("activityLevel", self.activity_level.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, message)| message.map(|m| (field, m)))
        .collect()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .messages()
            .into_iter()
            .map(|(_, message)| message)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}

impl std::error::Error for FormErrors {}

/// Parse a strictly positive, finite number
pub fn parse_positive(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

/// Validate weight value (in kg)
pub fn validate_weight(raw: &str) -> Result<f64, String> {
    parse_positive(raw).ok_or_else(|| WEIGHT_ERROR.to_string())
}

/// Validate height value (in any unit)
pub fn validate_height(raw: &str) -> Result<f64, String> {
    parse_positive(raw).ok_or_else(|| HEIGHT_ERROR.to_string())
}

/// Validate that an activity level was selected
///
/// Any non-empty tag passes; unknown tags are handled by the calculator's
/// default multiplier.
pub fn validate_activity_level(raw: &str) -> Result<ActivityLevel, String> {
    if raw.trim().is_empty() {
        return Err(ACTIVITY_LEVEL_ERROR.to_string());
    }
    Ok(ActivityLevel::from_tag(raw))
}

/// Validate the whole form, producing calculator input or every field error
pub fn validate_form(form: &FormInput) -> Result<MeasurementInput, FormErrors> {
    let weight = validate_weight(&form.weight);
    let height = validate_height(&form.height);
    let activity = validate_activity_level(&form.activity_level);

    match (weight, height, activity) {
        (Ok(weight_kg), Ok(height), Ok(activity_level)) => {
            let height_unit = if form.height_unit.trim().is_empty() {
                HeightUnit::default()
            } else {
                HeightUnit::from_tag(&form.height_unit)
            };
            let language = match form.language.trim() {
                "" => DEFAULT_LANGUAGE.to_string(),
                language => language.to_string(),
            };

            Ok(MeasurementInput {
                weight_kg,
                height,
                height_unit,
                activity_level,
                language,
            })
        }
        (weight, height, activity) => Err(FormErrors {
            weight: weight.err(),
            height: height.err(),
            activity_level: activity.err(),
        }),
    }
}
