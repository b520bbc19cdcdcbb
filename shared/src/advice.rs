//! Advice prompt construction and reply normalization
//!
//! The transport to the generative-language service lives in the app crate;
//! this module holds the parts that do not depend on it, so the browser build
//! can reuse them.

use crate::health_metrics::{unrounded_bmi, ActivityLevel, BmiCategory};
use crate::models::{FitnessMetrics, MeasurementInput};
use serde::{Deserialize, Serialize};

/// Number of tips requested from the advice service
pub const TIPS_REQUESTED: usize = 3;

/// Shown in place of advice whenever the service cannot be used
pub const FALLBACK_SUGGESTION: &str = "Unable to generate suggestions. Please try again later.";

/// Context sent to the advice service for one assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceRequest {
    /// BMI before display rounding
    pub bmi: f64,
    pub category: BmiCategory,
    pub activity_level: ActivityLevel,
    pub language: String,
}

impl AdviceRequest {
    pub fn new(metrics: &FitnessMetrics, input: &MeasurementInput) -> Self {
        Self {
            bmi: unrounded_bmi(input),
            category: metrics.bmi_category,
            activity_level: input.activity_level.clone(),
            language: input.language.clone(),
        }
    }
}

/// Build the natural-language instruction for the advice service
pub fn build_prompt(request: &AdviceRequest) -> String {
    format!(
        "Give {tips} personalized fitness tips for:\n\
         - BMI: {bmi}\n\
         - Category: {category}\n\
         - Activity Level: {activity}\n\
         - Language: {language}\n\
         \n\
         Respond only in {language}. Use short, practical advice.\n",
        tips = TIPS_REQUESTED,
        bmi = request.bmi,
        category = request.category.label(),
        activity = request.activity_level.label(),
        language = request.language,
    )
}

/// Split a reply into its non-blank lines, preserving order
pub fn split_suggestions(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// What the advice boundary hands back to its caller
///
/// Failures never cross the boundary as errors; they arrive as
/// [`AdviceOutcome::Fallback`], which always renders as the single
/// [`FALLBACK_SUGGESTION`] line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdviceOutcome {
    Generated(Vec<String>),
    Fallback,
}

impl AdviceOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, AdviceOutcome::Fallback)
    }

    pub fn into_suggestions(self) -> Vec<String> {
        match self {
            AdviceOutcome::Generated(lines) => lines,
            AdviceOutcome::Fallback => vec![FALLBACK_SUGGESTION.to_string()],
        }
    }
}
