//! Client for the remote `/predict` endpoint.

use serde::Deserialize;
use url::Url;

use crate::config::{ConfigError, ServiceSettings};
use crate::features::FeatureRecord;
use crate::http_client;

/// Shown when a 2xx response does not carry a usable prediction.
pub const FORMAT_ERROR_MESSAGE: &str = "Unexpected response format from server.";
/// Shown when no response was received at all.
pub const UNREACHABLE_MESSAGE: &str =
    "Network or server unreachable. Make sure server is running.";
/// Prefix for messages built from an error response body.
pub const SERVER_ERROR_PREFIX: &str = "Server error: ";

/// A decision returned by the service.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prediction {
    /// `1` approves the loan, `0` rejects it.
    pub prediction: u8,
    /// Model probability of approval, in `[0, 1]`.
    pub probability: f64,
}

impl Prediction {
    pub fn is_approved(&self) -> bool {
        self.prediction == 1
    }
}

/// Failure modes of one prediction request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    /// No response arrived (connection refused, DNS failure, timeout).
    #[error("HTTP error: {0}")]
    Transport(String),
    /// The service answered with a non-2xx status.
    #[error("HTTP {code}: {detail}")]
    Status {
        code: u16,
        /// Error body re-serialized as JSON text.
        detail: String,
    },
    /// A 2xx response whose body is not a prediction.
    #[error("Unexpected response: {0}")]
    Format(String),
    /// A 2xx response whose body could not be read.
    #[error("Unreadable response body: {0}")]
    Body(String),
}

impl PredictError {
    /// Message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => UNREACHABLE_MESSAGE.to_string(),
            Self::Status { detail, .. } => format!("{SERVER_ERROR_PREFIX}{detail}"),
            Self::Format(_) | Self::Body(_) => FORMAT_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Anything that can turn a feature record into a prediction.
pub trait PredictionClient: Send + Sync {
    fn predict(&self, record: &FeatureRecord) -> Result<Prediction, PredictError>;
}

/// [`PredictionClient`] that POSTs JSON to the configured service.
#[derive(Clone, Debug)]
pub struct HttpPredictionClient {
    agent: ureq::Agent,
    endpoint: Url,
    max_response_bytes: usize,
}

impl HttpPredictionClient {
    pub fn new(settings: &ServiceSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            agent: http_client::build_agent(settings),
            endpoint: settings.predict_url()?,
            max_response_bytes: settings.max_response_bytes,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl PredictionClient for HttpPredictionClient {
    fn predict(&self, record: &FeatureRecord) -> Result<Prediction, PredictError> {
        tracing::debug!(endpoint = %self.endpoint, loan_id = %record.loan_id, "Sending prediction request");
        let request = self
            .agent
            .post(self.endpoint.as_str())
            .set("Accept", "application/json")
            .set("Content-Type", "application/json");

        let response = match request.send_json(record) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = http_client::read_response_text(response, self.max_response_bytes)
                    .unwrap_or_default();
                return Err(PredictError::Status {
                    code,
                    detail: serialize_error_body(code, &body),
                });
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(PredictError::Transport(err.to_string()));
            }
        };

        let body = http_client::read_response_text(response, self.max_response_bytes)
            .map_err(|err| PredictError::Body(err.to_string()))?;
        parse_prediction_response(&body)
    }
}

#[derive(Debug, Deserialize)]
struct PredictionWire {
    #[serde(default)]
    prediction: Option<f64>,
    #[serde(default)]
    probability: Option<f64>,
}

/// Validate a 2xx body: a numeric `prediction` of 0 or 1 and a `probability` in `[0, 1]`.
pub(crate) fn parse_prediction_response(body: &str) -> Result<Prediction, PredictError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(PredictError::Format("Empty response body".to_string()));
    }
    let wire: PredictionWire = serde_json::from_str(trimmed)
        .map_err(|err| PredictError::Format(format!("{err}: {trimmed}")))?;
    let (Some(prediction), Some(probability)) = (wire.prediction, wire.probability) else {
        return Err(PredictError::Format(format!(
            "Missing prediction/probability in response: {trimmed}"
        )));
    };
    let prediction = if prediction == 0.0 {
        0
    } else if prediction == 1.0 {
        1
    } else {
        return Err(PredictError::Format(format!(
            "prediction must be 0 or 1, got {prediction}"
        )));
    };
    if !(0.0..=1.0).contains(&probability) {
        return Err(PredictError::Format(format!(
            "probability must be within [0, 1], got {probability}"
        )));
    }
    Ok(Prediction {
        prediction,
        probability,
    })
}

/// Render an error body as compact JSON; plain text becomes a JSON string.
fn serialize_error_body(code: u16, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return format!("HTTP {code}");
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => value.to_string(),
        Err(_) => serde_json::Value::String(trimmed.to_string()).to_string(),
    }
}
