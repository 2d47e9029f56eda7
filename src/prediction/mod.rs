//! Contract with the remote loan prediction service.

pub mod api;

pub use api::{HttpPredictionClient, PredictError, Prediction, PredictionClient};
