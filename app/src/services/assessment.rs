//! Assessment service - computes metrics and fetches advice for one submission

use crate::advice::{AdviceClient, AdviceProvider};
use fitness_tracker_shared::health_metrics::calculate_fitness_metrics;
use fitness_tracker_shared::{AdviceRequest, FitnessResult, MeasurementInput};
use tracing::{info, warn};

/// Assessment service
pub struct AssessmentService;

impl AssessmentService {
    /// Run one assessment
    ///
    /// The metrics are computed first; the advice service sees the unrounded
    /// BMI and its category. Always returns a displayable result.
    pub async fn assess<P: AdviceProvider>(
        input: &MeasurementInput,
        advice: &AdviceClient<P>,
    ) -> FitnessResult {
        if !input.height_unit.is_recognized() {
            warn!(unit = %input.height_unit, "Unknown height unit, treating value as meters");
        }
        if !input.activity_level.is_recognized() {
            warn!(
                activity_level = %input.activity_level,
                "Unknown activity level, using default multiplier"
            );
        }

        let metrics = calculate_fitness_metrics(input);

        info!(
            bmi = metrics.bmi,
            category = %metrics.bmi_category,
            daily_calories = metrics.daily_calories,
            height_unit = %input.height_unit,
            "Calculated fitness metrics"
        );

        let outcome = advice.fetch(&AdviceRequest::new(&metrics, input)).await;
        metrics.with_suggestions(outcome.into_suggestions())
    }
}
