//! Fitness Tracker WASM Module
//!
//! WebAssembly bindings over the shared core so a browser page can run the
//! calculator and prompt handling locally. The host page owns `localStorage`
//! and the network; this module only supplies the key, the encoding and the
//! text it should send.

use fitness_tracker_shared::{
    advice::{build_prompt, split_suggestions},
    calculate_fitness_metrics as calculate_metrics, classify_bmi, preferences,
    validate_form, ActivityLevel, AdviceRequest, FormInput, HeightUnit, MeasurementInput,
    DARK_MODE_KEY, DEFAULT_LANGUAGE, FALLBACK_SUGGESTION,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

/// Calculate BMI, category and daily calories; returns the metrics as JSON
#[wasm_bindgen]
pub fn calculate_fitness_metrics(
    weight_kg: f64,
    height: f64,
    height_unit: &str,
    activity_level: &str,
) -> Result<String, String> {
    let input = MeasurementInput {
        weight_kg,
        height,
        height_unit: HeightUnit::from_tag(height_unit),
        activity_level: ActivityLevel::from_tag(activity_level),
        language: DEFAULT_LANGUAGE.to_string(),
    };
    to_json(&calculate_metrics(&input))
}

/// Validate raw form fields and calculate them in one step
///
/// Returns the metrics as JSON, or the field messages joined with "; ".
#[wasm_bindgen]
pub fn assess_form(
    weight: &str,
    height: &str,
    height_unit: &str,
    activity_level: &str,
    language: &str,
) -> Result<String, String> {
    let form = FormInput {
        weight: weight.to_string(),
        height: height.to_string(),
        height_unit: height_unit.to_string(),
        activity_level: activity_level.to_string(),
        language: language.to_string(),
    };
    let input = validate_form(&form).map_err(|errors| errors.to_string())?;
    to_json(&calculate_metrics(&input))
}

/// Category label for an unrounded BMI
#[wasm_bindgen]
pub fn bmi_category_label(bmi: f64) -> String {
    classify_bmi(bmi).label().to_string()
}

/// Fill level (0-100) of the BMI bar
#[wasm_bindgen]
pub fn bmi_gauge_percent(bmi: f64) -> f64 {
    fitness_tracker_shared::bmi_gauge_percent(bmi)
}

/// Prompt text to send to the advice service
#[wasm_bindgen]
pub fn build_advice_prompt(bmi: f64, activity_level: &str, language: &str) -> String {
    build_prompt(&AdviceRequest {
        bmi,
        category: classify_bmi(bmi),
        activity_level: ActivityLevel::from_tag(activity_level),
        language: language.to_string(),
    })
}

/// Split the service reply into suggestion lines
///
/// A reply with no usable lines yields the fallback line.
#[wasm_bindgen]
pub fn split_advice_reply(text: &str) -> Vec<String> {
    let lines = split_suggestions(text);
    if lines.is_empty() {
        vec![FALLBACK_SUGGESTION.to_string()]
    } else {
        lines
    }
}

#[wasm_bindgen]
pub fn fallback_suggestion() -> String {
    FALLBACK_SUGGESTION.to_string()
}

/// `localStorage` key holding the theme preference
#[wasm_bindgen]
pub fn dark_mode_storage_key() -> String {
    DARK_MODE_KEY.to_string()
}

/// Decode the stored theme value; anything unreadable means light mode
#[wasm_bindgen]
pub fn parse_dark_mode(stored: Option<String>) -> bool {
    preferences::parse_dark_mode(stored.as_deref())
}

#[wasm_bindgen]
pub fn encode_dark_mode(enabled: bool) -> String {
    preferences::encode_dark_mode(enabled)
}
