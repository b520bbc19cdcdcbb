//! Domain models for the fitness tracker
//!
//! These models represent a single assessment: what the user entered and what
//! the calculator and advice service produced for it. None of them outlive a
//! single request/response cycle.

use crate::health_metrics::{ActivityLevel, BmiCategory};
use crate::units::HeightUnit;
use serde::{Deserialize, Serialize};

/// Language used when the form leaves it unset
pub const DEFAULT_LANGUAGE: &str = "English";

/// Languages offered by the language dropdown as `(value, label)` pairs
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("English", "English"),
    ("Hindi", "हिंदी (Hindi)"),
];

/// Validated measurements for one assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementInput {
    /// Weight in kilograms, > 0
    pub weight_kg: f64,
    /// Height in `height_unit`, > 0
    pub height: f64,
    pub height_unit: HeightUnit,
    pub activity_level: ActivityLevel,
    /// Free-form label of the language the advice should be written in
    pub language: String,
}

/// Numeric output of the metric calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessMetrics {
    /// BMI rounded to one decimal place
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    /// Daily calorie target in kcal
    pub daily_calories: u32,
}

impl FitnessMetrics {
    /// Combine the metrics with advice into the displayable result
    pub fn with_suggestions(self, suggestions: Vec<String>) -> FitnessResult {
        FitnessResult {
            bmi: self.bmi,
            bmi_category: self.bmi_category,
            daily_calories: self.daily_calories,
            suggestions,
        }
    }
}

/// Everything the result view shows for one assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessResult {
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub daily_calories: u32,
    /// Advice lines in the order the service returned them
    pub suggestions: Vec<String>,
}
