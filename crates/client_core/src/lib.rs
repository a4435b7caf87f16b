//! Client-side contact form controller.
//!
//! [`ContactFormController`] owns the form state, checks it locally with the
//! shared rules before any request, posts through a [`SubmissionTransport`],
//! and turns the outcome into a phase plus a feedback sentence.

use std::collections::BTreeMap;

use shared::{
    domain::Field,
    protocol::SubmissionRequest,
    validation::{check_field, Violation},
};
use tracing::{debug, info, warn};

pub mod error;
pub mod transport;

pub use error::TransportError;
pub use transport::{HttpTransport, SubmissionTransport, TransportResponse};

pub const INVALID_FORM_FEEDBACK: &str = "Please correct the highlighted fields before resubmitting.";
pub const SUCCESS_FEEDBACK: &str =
    "Thank you! Your message has been sent successfully. I'll get back to you soon.";
pub const SERVER_FAILURE_FEEDBACK: &str = "Something went wrong, please try again.";
pub const TRANSPORT_FAILURE_FEEDBACK: &str =
    "Sorry, there was an error sending your message. Please try again later.";
pub const INVALID_EMAIL_FEEDBACK: &str = "Please enter a valid email address.";

/// Per-field messages; a field is present only while it is invalid.
pub type FieldErrors = BTreeMap<Field, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub values: SubmissionRequest,
    pub errors: FieldErrors,
    pub phase: SubmitPhase,
    pub feedback: String,
}

impl FormState {
    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }
}

/// Checks every field and returns only the failures. Pure; same input, same map.
pub fn validate(values: &SubmissionRequest) -> FieldErrors {
    Field::ALL
        .into_iter()
        .filter_map(|field| {
            check_field(field, Some(values.get(field)))
                .map(|violation| (field, violation_message(field, violation)))
        })
        .collect()
}

fn violation_message(field: Field, violation: Violation) -> String {
    match violation {
        Violation::Missing => format!("{} is required.", field.label()),
        Violation::InvalidEmail => INVALID_EMAIL_FEEDBACK.to_string(),
    }
}

pub struct ContactFormController<T: SubmissionTransport> {
    transport: T,
    state: FormState,
}

impl<T: SubmissionTransport> ContactFormController<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: FormState::default(),
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Stores `value` as typed and clears that field's error only.
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        self.state.values.set(field, value);
        self.state.errors.remove(&field);
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.state.is_submitting()
    }

    /// Synchronous half of a submission. Returns the request to send, or `None`
    /// when nothing may go on the wire.
    pub fn begin_submit(&mut self) -> Option<SubmissionRequest> {
        if self.state.is_submitting() {
            debug!("submission already in flight; ignoring submit");
            return None;
        }

        self.state.phase = SubmitPhase::Idle;
        self.state.feedback.clear();

        let errors = validate(&self.state.values);
        if !errors.is_empty() {
            debug!(invalid_fields = errors.len(), "contact form failed local validation");
            self.state.errors = errors;
            self.state.phase = SubmitPhase::Failed;
            self.state.feedback = INVALID_FORM_FEEDBACK.to_string();
            return None;
        }

        self.state.errors.clear();
        self.state.phase = SubmitPhase::Submitting;
        Some(self.state.values.clone())
    }

    /// Applies the transport outcome of the request handed out by [`Self::begin_submit`].
    pub fn finish_submit(
        &mut self,
        outcome: Result<TransportResponse, TransportError>,
    ) -> SubmitPhase {
        self.state.settle(outcome)
    }

    /// Validates, posts, and applies the outcome. No retries.
    ///
    /// Dropping the returned future mid-request leaves the form `Failed`
    /// rather than stuck in `Submitting`.
    pub async fn submit(&mut self) -> SubmitPhase {
        let Some(request) = self.begin_submit() else {
            return self.state.phase;
        };
        let mut in_flight = InFlight {
            state: &mut self.state,
        };
        let outcome = self.transport.post_submission(&request).await;
        in_flight.state.settle(outcome)
    }
}

impl FormState {
    fn settle(&mut self, outcome: Result<TransportResponse, TransportError>) -> SubmitPhase {
        if !self.is_submitting() {
            debug!("no submission in flight; ignoring outcome");
            return self.phase;
        }

        match outcome {
            Ok(response) => {
                let accepted =
                    response.is_success() && response.body.as_ref().is_some_and(|b| b.success);
                if accepted {
                    info!("contact message accepted");
                    self.phase = SubmitPhase::Succeeded;
                    self.feedback = SUCCESS_FEEDBACK.to_string();
                    self.values = SubmissionRequest::default();
                } else {
                    warn!(status = response.status, "contact submission rejected");
                    let message = response
                        .body
                        .and_then(|body| body.error)
                        .filter(|error| !error.trim().is_empty())
                        .unwrap_or_else(|| SERVER_FAILURE_FEEDBACK.to_string());
                    self.fail(message);
                }
            }
            Err(err) => {
                warn!(error = %err, "contact submission could not be sent");
                let message = err.user_message().unwrap_or(TRANSPORT_FAILURE_FEEDBACK);
                self.fail(message.to_string());
            }
        }
        self.phase
    }

    fn fail(&mut self, feedback: String) {
        self.phase = SubmitPhase::Failed;
        self.feedback = feedback;
    }
}

/// Clears the submitting phase if the request is abandoned before it settles.
struct InFlight<'a> {
    state: &'a mut FormState,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.state.is_submitting() {
            warn!("contact submission abandoned before completion");
            self.state.fail(TRANSPORT_FAILURE_FEEDBACK.to_string());
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
