//! Health metrics calculations module
//!
//! Turns a validated [`MeasurementInput`] into BMI, a BMI category and a daily
//! calorie target.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Table Lookups**: Category and activity policies live in immutable
//!    tables with an explicit fallback
//! 3. **Type Safety**: Heights carry their unit until normalized to meters

use crate::models::{FitnessMetrics, MeasurementInput};
use crate::units::meters_to_cm;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Activity Levels
// ============================================================================

/// Self-reported activity level used to scale BMR
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    Active,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Any tag outside the fixed enumeration
    Unrecognized(String),
}

/// Multiplier applied to BMR for each known activity level
pub const ACTIVITY_MULTIPLIERS: [(ActivityLevel, f64); 4] = [
    (ActivityLevel::Sedentary, 1.2),
    (ActivityLevel::LightlyActive, 1.375),
    (ActivityLevel::Active, 1.55),
    (ActivityLevel::VeryActive, 1.725),
];

/// Multiplier used when the activity tag is not in [`ACTIVITY_MULTIPLIERS`]
pub const DEFAULT_ACTIVITY_MULTIPLIER: f64 = 1.2;

/// Known activity levels in dropdown order
pub const ACTIVITY_LEVEL_OPTIONS: [ActivityLevel; 4] = [
    ActivityLevel::Sedentary,
    ActivityLevel::LightlyActive,
    ActivityLevel::Active,
    ActivityLevel::VeryActive,
];

impl ActivityLevel {
    /// Parse an activity tag such as `"Lightly Active"`
    ///
    /// Tags must match a dropdown value exactly; anything else is kept as
    /// [`ActivityLevel::Unrecognized`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Sedentary" => ActivityLevel::Sedentary,
            "Lightly Active" => ActivityLevel::LightlyActive,
            "Active" => ActivityLevel::Active,
            "Very Active" => ActivityLevel::VeryActive,
            _ => ActivityLevel::Unrecognized(tag.to_string()),
        }
    }

    /// Get the activity multiplier for the daily calorie estimate
    pub fn multiplier(&self) -> f64 {
        ACTIVITY_MULTIPLIERS
            .iter()
            .find(|(level, _)| level == self)
            .map(|(_, multiplier)| *multiplier)
            .unwrap_or(DEFAULT_ACTIVITY_MULTIPLIER)
    }

    /// Tag as submitted by the form and embedded in the advice prompt
    pub fn label(&self) -> &str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::LightlyActive => "Lightly Active",
            ActivityLevel::Active => "Active",
            ActivityLevel::VeryActive => "Very Active",
            ActivityLevel::Unrecognized(tag) => tag,
        }
    }

    /// Get a human-readable description for the dropdown
    pub fn description(&self) -> &str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (little to no exercise)",
            ActivityLevel::LightlyActive => "Lightly Active (light exercise 1-3 days/week)",
            ActivityLevel::Active => "Active (moderate exercise 3-5 days/week)",
            ActivityLevel::VeryActive => "Very Active (hard exercise 6-7 days/week)",
            ActivityLevel::Unrecognized(tag) => tag,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, ActivityLevel::Unrecognized(_))
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<&str> for ActivityLevel {
    fn from(tag: &str) -> Self {
        ActivityLevel::from_tag(tag)
    }
}

impl From<String> for ActivityLevel {
    fn from(tag: String) -> Self {
        ActivityLevel::from_tag(&tag)
    }
}

impl From<ActivityLevel> for String {
    fn from(level: ActivityLevel) -> Self {
        level.label().to_string()
    }
}

// ============================================================================
// BMI Calculations
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    #[serde(rename = "Underweight")]
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    #[serde(rename = "Overweight")]
    Overweight,
    #[serde(rename = "Obese")]
    Obese,
}

/// Exclusive upper bound of each category, ascending
pub const BMI_CATEGORY_BOUNDS: [(f64, BmiCategory); 3] = [
    (18.5, BmiCategory::Underweight),
    (25.0, BmiCategory::NormalWeight),
    (30.0, BmiCategory::Overweight),
];

/// Category for any BMI at or above the last bound
pub const BMI_FALLBACK_CATEGORY: BmiCategory = BmiCategory::Obese;

impl BmiCategory {
    /// Label shown next to the BMI value
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_m: f64) -> f64 {
    weight_kg / (height_m * height_m)
}

/// Round half-up on the tenths digit
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Classify BMI into category
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    BMI_CATEGORY_BOUNDS
        .iter()
        .find(|(upper, _)| bmi < *upper)
        .map(|(_, category)| *category)
        .unwrap_or(BMI_FALLBACK_CATEGORY)
}

/// Fill level (0-100) of the BMI bar, where a BMI of 40 fills it completely
pub fn bmi_gauge_percent(bmi: f64) -> f64 {
    (bmi / 40.0 * 100.0).clamp(0.0, 100.0)
}

// ============================================================================
// BMR and Calorie Calculations
// ============================================================================

/// Age plugged into the BMR formula; the form does not ask for it
pub const ASSUMED_AGE_YEARS: f64 = 30.0;

/// Calculate BMR using the revised Harris-Benedict equation
///
/// BMR = 88.362 + 13.397 × weight(kg) + 4.799 × height(cm) - 5.677 × age(y)
pub fn calculate_bmr(weight_kg: f64, height_cm: f64) -> f64 {
    88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * ASSUMED_AGE_YEARS
}

/// Daily calorie target: BMR × activity multiplier, rounded, never negative
pub fn calculate_daily_calories(weight_kg: f64, height_cm: f64, activity: &ActivityLevel) -> u32 {
    let calories = calculate_bmr(weight_kg, height_cm) * activity.multiplier();
    calories.round().max(0.0) as u32
}

/// BMI before rounding, as classified and sent to the advice service
pub fn unrounded_bmi(input: &MeasurementInput) -> f64 {
    calculate_bmi(input.weight_kg, input.height_unit.to_meters(input.height))
}

/// Run the full metric calculation for one form submission
///
/// The category is taken from the unrounded BMI; only the reported value is
/// rounded, so 24.96 shows as 25.0 and is still "Normal weight".
pub fn calculate_fitness_metrics(input: &MeasurementInput) -> FitnessMetrics {
    let height_m = input.height_unit.to_meters(input.height);
    let bmi = unrounded_bmi(input);

    FitnessMetrics {
        bmi: round_to_tenth(bmi),
        bmi_category: classify_bmi(bmi),
        daily_calories: calculate_daily_calories(
            input.weight_kg,
            meters_to_cm(height_m),
            &input.activity_level,
        ),
    }
}
