use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use server_api::{submit_contact, ContactContext};
use shared::{
    error::{ApiError, ErrorCode, INVALID_JSON_MESSAGE, PAYLOAD_TOO_LARGE_MESSAGE},
    protocol::SubmissionResult,
};
use tracing::info;

use crate::app_state::AppState;

pub(crate) async fn healthz() -> &'static str {
    "ok"
}

pub(crate) async fn contact(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> (StatusCode, Json<SubmissionResult>) {
    let (status, result) = match body {
        Ok(body) => handle(&state.contact, &body).await,
        Err(rejection) => unreadable_body(rejection),
    };
    (status, Json(result))
}

/// A body that never reached the handler still answers with a result object.
pub(crate) fn unreadable_body(rejection: BytesRejection) -> (StatusCode, SubmissionResult) {
    info!(reason = %rejection.body_text(), "rejecting unreadable contact body");
    let message = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        PAYLOAD_TOO_LARGE_MESSAGE
    } else {
        INVALID_JSON_MESSAGE
    };
    let err = ApiError::new(ErrorCode::InvalidPayload, message);
    (status_for(err.code), err.into())
}

/// One pass from raw body to response; never fails past this point.
pub(crate) async fn handle(ctx: &ContactContext, raw_body: &[u8]) -> (StatusCode, SubmissionResult) {
    match submit_contact(ctx, raw_body).await {
        Ok(()) => (StatusCode::OK, SubmissionResult::ok()),
        Err(err) => (status_for(err.code), err.into()),
    }
}

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    if code.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
