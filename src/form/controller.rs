//! Form state manager.
//!
//! Every operation synchronously replaces the [`SessionState`] snapshot and
//! then notifies subscribers. Submissions are tagged with a generation so a
//! completion that lands after `reset()` (or after a newer submission) is
//! discarded instead of overwriting fresh state.

use std::fmt;
use std::sync::Arc;

use super::state::{Outcome, SessionState};
use super::submission::SubmissionJobs;
use crate::features::{Field, FeatureRecord, coerce_field};

type Subscriber = Box<dyn FnMut(&SessionState)>;

/// Handle returned by [`FormController::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Proof that a submission was started, carrying the record as sent.
#[derive(Clone, Debug)]
pub struct SubmissionTicket {
    generation: u64,
    record: Arc<FeatureRecord>,
}

impl SubmissionTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The draft exactly as it was when the submission began.
    pub fn record(&self) -> &Arc<FeatureRecord> {
        &self.record
    }
}

/// Reasons a submission cannot start.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("A submission is already in progress")]
    AlreadyLoading,
}

/// Owns the session state for one form.
pub struct FormController {
    state: SessionState,
    generation: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    pub(super) jobs: SubmissionJobs,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FormController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl FormController {
    pub fn new() -> Self {
        Self {
            state: SessionState::default(),
            generation: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
            jobs: SubmissionJobs::new(),
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Current draft record. A new `Arc` is installed on every edit.
    pub fn features(&self) -> Arc<FeatureRecord> {
        Arc::clone(&self.state.features)
    }

    /// Coerce `raw` into `field` and install the resulting record.
    pub fn set_field(&mut self, field: Field, raw: &str) -> Arc<FeatureRecord> {
        let next = Arc::new(coerce_field(&self.state.features, field, raw));
        tracing::debug!(field = %field, raw, "Form field updated");
        self.state.features = Arc::clone(&next);
        self.notify();
        next
    }

    /// Restore the initial session. In-flight submissions become stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = SessionState::default();
        tracing::debug!(generation = self.generation, "Form reset");
        self.notify();
    }

    /// Enter the loading state, clearing any previous result or error.
    pub fn begin_submit(&mut self) -> Result<SubmissionTicket, SubmitError> {
        if self.state.loading {
            return Err(SubmitError::AlreadyLoading);
        }
        self.generation += 1;
        self.state.loading = true;
        self.state.result = None;
        self.state.error = None;
        let ticket = SubmissionTicket {
            generation: self.generation,
            record: Arc::clone(&self.state.features),
        };
        self.notify();
        Ok(ticket)
    }

    /// Apply the outcome of the submission identified by `ticket`.
    ///
    /// Returns `false` without touching state when the ticket is stale.
    pub fn complete_submit(&mut self, ticket: &SubmissionTicket, outcome: Outcome) -> bool {
        if !self.is_current(ticket) {
            tracing::warn!(
                ticket = ticket.generation,
                current = self.generation,
                "Discarding stale submission result"
            );
            return false;
        }
        self.state.loading = false;
        match outcome {
            Outcome::Success(prediction) => {
                self.state.result = Some(prediction);
                self.state.error = None;
            }
            Outcome::Failure { message } => {
                self.state.result = None;
                self.state.error = Some(message);
            }
        }
        self.notify();
        true
    }

    /// Clear the visible error without touching the draft or result.
    pub fn dismiss_error(&mut self) {
        if self.state.error.take().is_some() {
            self.notify();
        }
    }

    /// Whether `ticket` belongs to the submission the form is waiting on.
    pub fn is_current(&self, ticket: &SubmissionTicket) -> bool {
        self.state.loading && ticket.generation == self.generation
    }

    /// Register a callback invoked with the new snapshot after every change.
    pub fn subscribe(&mut self, callback: impl FnMut(&SessionState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&self.state);
        }
    }
}
