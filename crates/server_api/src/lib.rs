//! Server-side handling of contact form submissions.
//!
//! [`submit_contact`] re-validates the untrusted body, renders the email and
//! hands it to the configured [`Mailer`] exactly once. Failures come back as
//! [`ApiError`]; the HTTP layer decides the status code.

use std::sync::Arc;

use mail_integration::{MailError, Mailer};
use serde_json::Value;
use shared::{
    domain::Field,
    error::{ApiError, ErrorCode, INVALID_EMAIL_MESSAGE, INVALID_JSON_MESSAGE},
    protocol::SubmissionRequest,
    validation::{is_valid_email, missing_fields},
};
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

mod compose;

pub use compose::{EmailComposer, Envelope, DEFAULT_MAIL_FROM, DEFAULT_MAIL_TO, DEFAULT_SUBJECT_TAG};

#[derive(Clone)]
pub struct ContactContext {
    /// `None` when no provider credential is configured.
    pub mailer: Option<Arc<dyn Mailer>>,
    pub composer: Arc<EmailComposer>,
}

pub async fn submit_contact(ctx: &ContactContext, raw_body: &[u8]) -> Result<(), ApiError> {
    let submission_id = Uuid::new_v4();
    let span = info_span!("contact_submission", %submission_id);
    process_submission(ctx, raw_body).instrument(span).await
}

async fn process_submission(ctx: &ContactContext, raw_body: &[u8]) -> Result<(), ApiError> {
    let Some(mailer) = ctx.mailer.as_ref() else {
        error!("email delivery is not configured; rejecting contact submission");
        return Err(ApiError::opaque(ErrorCode::Unavailable));
    };

    let submission = parse_submission(raw_body)?;

    let email = ctx.composer.compose(&submission).map_err(|e| {
        error!(error = %e, "failed to render contact email");
        ApiError::opaque(ErrorCode::Internal)
    })?;

    match mailer.send(&email).await {
        Ok(receipt) => {
            info!(email_id = %receipt.id, "contact submission dispatched");
            Ok(())
        }
        Err(err) => Err(dispatch_failure(err)),
    }
}

/// Parses and validates the body without trusting anything the client checked.
pub fn parse_submission(raw_body: &[u8]) -> Result<SubmissionRequest, ApiError> {
    let body: Value = serde_json::from_slice(raw_body).map_err(|e| {
        info!(error = %e, "rejecting contact body that is not JSON");
        ApiError::new(ErrorCode::InvalidPayload, INVALID_JSON_MESSAGE)
    })?;

    let lookup = |field: Field| body.get(field.key()).and_then(Value::as_str);

    let missing = missing_fields(lookup);
    if !missing.is_empty() {
        let keys = missing
            .iter()
            .map(|field| field.key())
            .collect::<Vec<_>>()
            .join(", ");
        info!(fields = %keys, "rejecting contact submission with missing fields");
        return Err(ApiError::new(
            ErrorCode::Validation,
            format!("Missing or invalid fields: {keys}"),
        ));
    }

    let value = |field: Field| lookup(field).unwrap_or_default().to_string();
    let submission = SubmissionRequest {
        name: value(Field::Name),
        email: value(Field::Email),
        subject: value(Field::Subject),
        message: value(Field::Message),
    };

    if !is_valid_email(&submission.email) {
        info!("rejecting contact submission with malformed email");
        return Err(ApiError::new(ErrorCode::Validation, INVALID_EMAIL_MESSAGE));
    }

    Ok(submission)
}

fn dispatch_failure(err: MailError) -> ApiError {
    match err {
        MailError::Rejected {
            status,
            name,
            message,
        } => {
            error!(status, %name, %message, "email provider rejected contact message");
            ApiError::opaque(ErrorCode::Provider)
        }
        other => {
            error!(error = %other, "unexpected failure while sending contact email");
            ApiError::opaque(ErrorCode::Internal)
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
