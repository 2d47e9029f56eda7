use std::sync::Arc;

use crate::features::FeatureRecord;
use crate::prediction::{PredictError, Prediction};

/// Snapshot of one form session: the draft record plus submission status.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    /// Current editable draft. Replaced, never mutated, on every edit.
    pub features: Arc<FeatureRecord>,
    /// True only while a submission is in flight.
    pub loading: bool,
    /// Last successful prediction.
    pub result: Option<Prediction>,
    /// Last submission error, ready for display.
    pub error: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            features: Arc::new(FeatureRecord::default()),
            loading: false,
            result: None,
            error: None,
        }
    }
}

impl SessionState {
    pub fn phase(&self) -> SubmissionPhase {
        if self.loading {
            SubmissionPhase::Loading
        } else if self.result.is_some() {
            SubmissionPhase::Succeeded
        } else if self.error.is_some() {
            SubmissionPhase::Failed
        } else {
            SubmissionPhase::Idle
        }
    }
}

/// Coarse submission status derived from a [`SessionState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Result of one request/response cycle.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Success(Prediction),
    Failure { message: String },
}

impl Outcome {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }
}

impl From<Result<Prediction, PredictError>> for Outcome {
    fn from(result: Result<Prediction, PredictError>) -> Self {
        match result {
            Ok(prediction) => Self::Success(prediction),
            Err(err) => Self::failure(err.user_message()),
        }
    }
}
