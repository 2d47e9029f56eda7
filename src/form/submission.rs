//! Submission pipeline: one request/response cycle per submit.
//!
//! `submit` runs the request on the caller's thread. `submit_in_background`
//! runs it on a worker thread and delivers the outcome over a channel that
//! `poll_submissions` drains; the controller decides whether the completion
//! is still current.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use super::controller::{FormController, SubmissionTicket, SubmitError};
use super::state::Outcome;
use crate::features::FeatureRecord;
use crate::prediction::PredictionClient;

/// Shown when the request worker died without producing an outcome.
pub const WORKER_FAILED_MESSAGE: &str = "Prediction request failed unexpectedly.";

pub(crate) struct SubmissionMessage {
    ticket: SubmissionTicket,
    outcome: Outcome,
}

pub(crate) struct SubmissionJobs {
    message_tx: Sender<SubmissionMessage>,
    message_rx: Receiver<SubmissionMessage>,
    in_flight: usize,
}

impl SubmissionJobs {
    pub(crate) fn new() -> Self {
        let (message_tx, message_rx) = mpsc::channel();
        Self {
            message_tx,
            message_rx,
            in_flight: 0,
        }
    }

    fn begin(&mut self, ticket: SubmissionTicket, client: Arc<dyn PredictionClient>) {
        self.in_flight += 1;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let outcome = run_request(client.as_ref(), ticket.record());
            let _ = tx.send(SubmissionMessage { ticket, outcome });
        });
    }

    fn try_recv(&mut self) -> Option<SubmissionMessage> {
        match self.message_rx.try_recv() {
            Ok(message) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(message)
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

/// Send `record` and map the response to an [`Outcome`]. A panicking client
/// still yields a failure so the form always leaves the loading state.
fn run_request(client: &dyn PredictionClient, record: &FeatureRecord) -> Outcome {
    let outcome = match catch_unwind(AssertUnwindSafe(|| client.predict(record))) {
        Ok(result) => Outcome::from(result),
        Err(_) => Outcome::failure(WORKER_FAILED_MESSAGE),
    };
    match &outcome {
        Outcome::Success(prediction) => tracing::info!(
            loan_id = %record.loan_id,
            prediction = prediction.prediction,
            probability = prediction.probability,
            "Prediction received"
        ),
        Outcome::Failure { message } => {
            tracing::warn!(loan_id = %record.loan_id, "Prediction failed: {message}")
        }
    }
    outcome
}

impl FormController {
    /// Submit the current draft and wait for the outcome.
    pub fn submit(&mut self, client: &dyn PredictionClient) -> Result<Outcome, SubmitError> {
        let ticket = self.begin_submit()?;
        tracing::info!(generation = ticket.generation(), "Submitting application");
        let outcome = run_request(client, ticket.record());
        self.complete_submit(&ticket, outcome.clone());
        Ok(outcome)
    }

    /// Submit the current draft on a worker thread.
    ///
    /// The outcome is applied by a later [`poll_submissions`](Self::poll_submissions).
    pub fn submit_in_background(
        &mut self,
        client: Arc<dyn PredictionClient>,
    ) -> Result<SubmissionTicket, SubmitError> {
        let ticket = self.begin_submit()?;
        tracing::info!(
            generation = ticket.generation(),
            "Submitting application in background"
        );
        self.jobs.begin(ticket.clone(), client);
        Ok(ticket)
    }

    /// Apply any finished background submissions. Returns how many changed state.
    pub fn poll_submissions(&mut self) -> usize {
        let mut applied = 0;
        while let Some(message) = self.jobs.try_recv() {
            if self.complete_submit(&message.ticket, message.outcome) {
                applied += 1;
            }
        }
        applied
    }

    /// Number of background requests that have not reported back yet.
    pub fn submissions_in_flight(&self) -> usize {
        self.jobs.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::api::{FORMAT_ERROR_MESSAGE, UNREACHABLE_MESSAGE};
    use crate::prediction::{PredictError, Prediction};
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    struct StubClient {
        result: Result<Prediction, PredictError>,
        seen: Mutex<Vec<FeatureRecord>>,
    }

    impl StubClient {
        fn new(result: Result<Prediction, PredictError>) -> Self {
            Self {
                result,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl PredictionClient for StubClient {
        fn predict(&self, record: &FeatureRecord) -> Result<Prediction, PredictError> {
            self.seen.lock().unwrap().push(record.clone());
            self.result.clone()
        }
    }

    struct PanickingClient;

    impl PredictionClient for PanickingClient {
        fn predict(&self, _record: &FeatureRecord) -> Result<Prediction, PredictError> {
            panic!("model exploded");
        }
    }

    /// Blocks until the test releases it, so a reset can race the response.
    struct GatedClient {
        gate: Mutex<mpsc::Receiver<()>>,
    }

    impl PredictionClient for GatedClient {
        fn predict(&self, _record: &FeatureRecord) -> Result<Prediction, PredictError> {
            let _ = self.gate.lock().unwrap().recv();
            Ok(Prediction {
                prediction: 1,
                probability: 0.9,
            })
        }
    }

    fn poll_until_idle(form: &mut FormController) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while form.submissions_in_flight() > 0 {
            form.poll_submissions();
            assert!(Instant::now() < deadline, "background submission never finished");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn submit_sends_current_draft_and_stores_result() {
        let client = StubClient::new(Ok(Prediction {
            prediction: 1,
            probability: 0.82,
        }));
        let mut form = FormController::new();
        form.set_field(crate::features::Field::LoanId, "LP-77");
        let outcome = form.submit(&client).unwrap();
        assert!(matches!(outcome, Outcome::Success(_)));
        assert!(!form.state().loading);
        assert_eq!(form.state().result.map(|p| p.prediction), Some(1));
        assert_eq!(client.seen.lock().unwrap()[0].loan_id, "LP-77");
    }

    #[test]
    fn submit_format_error_leaves_result_absent() {
        let client = StubClient::new(Err(PredictError::Format("{}".into())));
        let mut form = FormController::new();
        form.submit(&client).unwrap();
        assert!(form.state().result.is_none());
        assert_eq!(form.state().error.as_deref(), Some(FORMAT_ERROR_MESSAGE));
    }

    #[test]
    fn panicking_client_still_clears_loading() {
        let mut form = FormController::new();
        let outcome = form.submit(&PanickingClient).unwrap();
        assert_eq!(outcome, Outcome::failure(WORKER_FAILED_MESSAGE));
        assert!(!form.state().loading);
    }

    #[test]
    fn background_submit_applies_on_poll() {
        let client = Arc::new(StubClient::new(Err(PredictError::Transport(
            "refused".into(),
        ))));
        let mut form = FormController::new();
        form.submit_in_background(client).unwrap();
        assert!(form.state().loading);
        poll_until_idle(&mut form);
        assert!(!form.state().loading);
        assert_eq!(form.state().error.as_deref(), Some(UNREACHABLE_MESSAGE));
    }

    #[test]
    fn background_submit_rejects_second_submit_while_loading() {
        let (release, gate) = mpsc::channel();
        let client: Arc<dyn PredictionClient> = Arc::new(GatedClient {
            gate: Mutex::new(gate),
        });
        let mut form = FormController::new();
        form.submit_in_background(Arc::clone(&client)).unwrap();
        assert_eq!(
            form.submit_in_background(client).unwrap_err(),
            SubmitError::AlreadyLoading
        );
        release.send(()).unwrap();
        poll_until_idle(&mut form);
        assert!(form.state().result.is_some());
    }

    #[test]
    fn reset_while_in_flight_discards_late_response() {
        let (release, gate) = mpsc::channel();
        let client = Arc::new(GatedClient {
            gate: Mutex::new(gate),
        });
        let mut form = FormController::new();
        form.submit_in_background(client).unwrap();
        form.reset();
        release.send(()).unwrap();
        poll_until_idle(&mut form);
        assert!(!form.state().loading);
        assert!(form.state().result.is_none());
        assert!(form.state().error.is_none());
    }
}
