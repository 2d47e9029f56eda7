//! Loan application form: typed applicant record, session state and
//! submission to a remote prediction service.
/// Application directory resolution.
pub mod app_dirs;
/// TOML configuration for the service connection.
pub mod config;
/// Applicant record, field identifiers and input coercion.
pub mod features;
/// Session state manager and submission pipeline.
pub mod form;
pub(crate) mod http_client;
/// Tracing subscriber setup.
pub mod logging;
/// Prediction service contract.
pub mod prediction;
