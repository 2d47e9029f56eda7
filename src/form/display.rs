//! Text shown for a prediction result.

use crate::prediction::Prediction;

/// Label and percentage rendered for a decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecisionView {
    pub label: &'static str,
    pub percentage: String,
}

impl From<&Prediction> for DecisionView {
    fn from(prediction: &Prediction) -> Self {
        Self {
            label: decision_label(prediction),
            percentage: format_probability(prediction.probability),
        }
    }
}

pub fn decision_label(prediction: &Prediction) -> &'static str {
    if prediction.is_approved() {
        "Approved"
    } else {
        "Rejected"
    }
}

/// `0.82` renders as `82%`.
pub fn format_probability(probability: f64) -> String {
    // `+ 0.0` folds a negative zero into `0`.
    format!("{:.0}%", (probability * 100.0).round() + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approval_renders_label_and_percent() {
        let view = DecisionView::from(&Prediction {
            prediction: 1,
            probability: 0.82,
        });
        assert_eq!(view.label, "Approved");
        assert_eq!(view.percentage, "82%");
    }

    #[test]
    fn rejection_renders_label_and_percent() {
        let view = DecisionView::from(&Prediction {
            prediction: 0,
            probability: 0.35,
        });
        assert_eq!(view.label, "Rejected");
        assert_eq!(view.percentage, "35%");
    }

    #[test]
    fn percentages_round_to_whole_numbers() {
        assert_eq!(format_probability(0.0), "0%");
        assert_eq!(format_probability(1.0), "100%");
        assert_eq!(format_probability(0.4449), "44%");
        assert_eq!(format_probability(0.576), "58%");
    }

    #[test]
    fn negative_zero_probability_renders_without_sign() {
        let prediction =
            crate::prediction::api::parse_prediction_response(r#"{"prediction":0,"probability":-0.0}"#)
                .unwrap();
        assert_eq!(DecisionView::from(&prediction).percentage, "0%");
    }
}
