//! User-facing report strings.
//!
//! Every line the report prints is built from one [`Messages`] table so the
//! wording stays consistent and can be swapped as a whole.

/// Width of the separator line.
pub const SEPARATOR_WIDTH: usize = 50;

/// String table for the text report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub program_banner: &'static str,
    pub measurement_start: &'static str,
    pub iteration_start: &'static str,
    pub dataset: &'static str,
    pub classifier_creation_time: &'static str,
    pub regressor_creation_time: &'static str,
    pub training_accuracy: &'static str,
    pub validation_accuracy: &'static str,
    pub classifier_evaluation_time: &'static str,
    pub regressor_evaluation_time: &'static str,
    pub accuracy: &'static str,
    pub worst_training_error: &'static str,
    pub worst_validation_error: &'static str,
    pub worst_evaluation_error: &'static str,
    pub training_rmse: &'static str,
    pub validation_rmse: &'static str,
    pub evaluation_rmse: &'static str,
    pub iteration_total: &'static str,
    pub measurement_total: &'static str,
    pub ending_timestamp: &'static str,
    pub program_finished: &'static str,
    pub seconds_unit: &'static str,
}

impl Messages {
    pub const fn english() -> Self {
        Self {
            program_banner: "Benchmarker",
            measurement_start: "Measurement date and time",
            iteration_start: "Starting iteration",
            dataset: "Dataset",
            classifier_creation_time: "Classifier creation time",
            regressor_creation_time: "Regressor creation time",
            training_accuracy: "Training accuracy",
            validation_accuracy: "Validation accuracy",
            classifier_evaluation_time: "Classifier evaluation time",
            regressor_evaluation_time: "Regressor evaluation time",
            accuracy: "Accuracy",
            worst_training_error: "Worst training error",
            worst_validation_error: "Worst validation error",
            worst_evaluation_error: "Worst evaluation error",
            training_rmse: "Training RMSE",
            validation_rmse: "Validation RMSE",
            evaluation_rmse: "Evaluation RMSE",
            iteration_total: "Total time of iteration number",
            measurement_total: "Total time of measurement",
            ending_timestamp: "Ending timestamp",
            program_finished: "Benchmarker has finished running.",
            seconds_unit: "[s]",
        }
    }

    /// The separator line printed between report sections.
    pub fn separator(&self) -> String {
        "-".repeat(SEPARATOR_WIDTH)
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_width() {
        let sep = Messages::default().separator();
        assert_eq!(sep.len(), SEPARATOR_WIDTH);
        assert!(sep.chars().all(|c| c == '-'));
    }

    #[test]
    fn test_english_is_default() {
        assert_eq!(Messages::default(), Messages::english());
        assert_eq!(Messages::english().seconds_unit, "[s]");
    }
}
