//! Submission controller
//!
//! Drives one request/response cycle per form submission. The request runs on
//! a spawned task and its result comes back over a oneshot channel, which the
//! event loop drains through [`SubmissionController::poll`].

use crate::api::RequestSubmitter;
use crate::error::{RequestError, SubmitError};
use crate::state::{InstanceRequest, Outcome, RequestForm, SubmissionState, SubmitReceipt};
use std::sync::Arc;
use tokio::sync::oneshot::{self, error::TryRecvError};

type Pending = oneshot::Receiver<Result<SubmitReceipt, RequestError>>;

pub struct SubmissionController {
    submitter: Arc<dyn RequestSubmitter>,
    state: SubmissionState,
    pending: Option<Pending>,
}

impl SubmissionController {
    pub fn new(submitter: Arc<dyn RequestSubmitter>) -> Self {
        Self {
            submitter,
            state: SubmissionState::Idle,
            pending: None,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Handle a submit event from the form.
    ///
    /// Returns false when the event was ignored because a request is already
    /// in flight. Validation failures finish the cycle immediately without
    /// touching the network; otherwise the request is spawned and the
    /// controller stays in `Submitting` until [`poll`](Self::poll) picks up
    /// the result.
    pub fn handle_submit(&mut self, form: &RequestForm) -> bool {
        if self.state.is_submitting() {
            tracing::debug!("Ignoring submit while a request is in flight");
            return false;
        }

        // Disables the submit control and hides the previous status
        self.state = SubmissionState::Submitting;

        let request = match InstanceRequest::from_form(form) {
            Ok(request) => request,
            Err(err) => {
                self.finish(Err(err.into()));
                return true;
            }
        };

        tracing::info!(
            requester = %request.requester_email,
            instance_name = %request.instance_name,
            instance_type = %request.instance_type,
            security_groups = request.security_group_ids.len(),
            "Submitting instance request"
        );

        let (tx, rx) = oneshot::channel();
        let submitter = Arc::clone(&self.submitter);
        tokio::spawn(async move {
            let result = submitter.submit(&request).await;
            let _ = tx.send(result);
        });
        self.pending = Some(rx);

        true
    }

    /// Pick up the in-flight result if it has arrived. Returns true if the
    /// state changed.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = self.pending.as_mut() else {
            return false;
        };

        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Closed) => Err(RequestError::Interrupted),
        };

        self.pending = None;
        self.finish(result.map_err(SubmitError::from));
        true
    }

    /// Wait for the in-flight request, if any, to finish
    #[cfg(test)]
    pub async fn settle(&mut self) {
        if let Some(rx) = self.pending.take() {
            let result = rx.await.unwrap_or(Err(RequestError::Interrupted));
            self.finish(result.map_err(SubmitError::from));
        }
    }

    /// Handle a reset event: hide the status region.
    ///
    /// An in-flight request keeps running; its status is already hidden.
    pub fn handle_reset(&mut self) {
        if let SubmissionState::Done { .. } = self.state {
            self.state = SubmissionState::Idle;
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        match &outcome {
            Ok(receipt) => tracing::info!(
                execution_arn = receipt.arn_or_placeholder(),
                request_id = receipt.request_id.as_deref().unwrap_or("N/A"),
                "Instance request submitted"
            ),
            Err(SubmitError::Validation(err)) => {
                tracing::warn!(error = ?err, "Instance request failed validation")
            }
            Err(SubmitError::Request(err)) => {
                tracing::error!(error = ?err, "Error submitting instance request")
            }
        }
        self.state = SubmissionState::done(outcome);
    }
}
