//! Form session state, its state manager and the submission pipeline.

mod controller;
pub mod display;
mod state;
mod submission;

pub use controller::{FormController, SubmissionTicket, SubmitError, SubscriptionId};
pub use display::DecisionView;
pub use state::{Outcome, SessionState, SubmissionPhase};
pub use submission::WORKER_FAILED_MESSAGE;
