use super::*;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct Captured {
    authorization: Arc<Mutex<Option<String>>>,
    email: Arc<Mutex<Option<OutboundEmail>>>,
}

#[derive(Clone)]
struct ProviderState {
    captured: Captured,
    status: StatusCode,
    reply: serde_json::Value,
}

async fn handle_emails(
    State(state): State<ProviderState>,
    headers: HeaderMap,
    Json(email): Json<OutboundEmail>,
) -> (StatusCode, Json<serde_json::Value>) {
    *state.captured.authorization.lock().await = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    *state.captured.email.lock().await = Some(email);
    (state.status, Json(state.reply))
}

async fn serve(app: Router) -> Url {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Url::parse(&format!("http://{addr}")).expect("url")
}

async fn spawn_provider(status: StatusCode, reply: serde_json::Value) -> (Url, Captured) {
    let captured = Captured::default();
    let app = Router::new()
        .route("/emails", post(handle_emails))
        .with_state(ProviderState {
            captured: captured.clone(),
            status,
            reply,
        });
    (serve(app).await, captured)
}

fn sample_email() -> OutboundEmail {
    OutboundEmail {
        from: "Portfolio Contact <onboarding@resend.dev>".into(),
        to: vec!["owner@example.com".into()],
        reply_to: "ada@example.com".into(),
        subject: "New Portfolio Contact: Hi".into(),
        html: "<p>Hello</p>".into(),
        text: "Hello".into(),
    }
}

fn mailer(url: &Url) -> ResendMailer {
    ResendMailer::new("re_test_key", url, Duration::from_secs(5)).expect("mailer")
}

#[test]
fn endpoint_tolerates_trailing_slash() {
    let url = Url::parse("https://api.resend.com/").expect("url");
    assert_eq!(mailer(&url).endpoint(), "https://api.resend.com/emails");
}

#[tokio::test]
async fn accepted_message_returns_receipt_and_sends_bearer_key() {
    let (url, captured) =
        spawn_provider(StatusCode::OK, serde_json::json!({ "id": "email_123" })).await;

    let receipt = mailer(&url).send(&sample_email()).await.expect("send");
    assert_eq!(receipt.id, "email_123");
    assert_eq!(
        captured.authorization.lock().await.as_deref(),
        Some("Bearer re_test_key")
    );
    assert_eq!(captured.email.lock().await.as_ref(), Some(&sample_email()));
}

#[tokio::test]
async fn provider_error_object_maps_to_rejected() {
    let (url, _captured) = spawn_provider(
        StatusCode::UNPROCESSABLE_ENTITY,
        serde_json::json!({
            "statusCode": 422,
            "name": "validation_error",
            "message": "Invalid `from` field."
        }),
    )
    .await;

    let err = mailer(&url).send(&sample_email()).await.expect_err("should fail");
    let MailError::Rejected {
        status,
        name,
        message,
    } = err
    else {
        panic!("expected rejection, got {err:?}");
    };
    assert_eq!(status, 422);
    assert_eq!(name, "validation_error");
    assert_eq!(message, "Invalid `from` field.");
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status_text() {
    let app = Router::new().route(
        "/emails",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    );
    let url = serve(app).await;

    let err = mailer(&url).send(&sample_email()).await.expect_err("should fail");
    let MailError::Rejected { status, message, .. } = err else {
        panic!("expected rejection, got {err:?}");
    };
    assert_eq!(status, 502);
    assert_eq!(message, "Bad Gateway");
}

#[tokio::test]
async fn unreadable_success_body_is_unexpected_response() {
    let app = Router::new().route("/emails", post(|| async { "queued" }));
    let url = serve(app).await;

    let err = mailer(&url).send(&sample_email()).await.expect_err("should fail");
    assert!(matches!(err, MailError::UnexpectedResponse(_)));
}

#[tokio::test]
async fn unreachable_provider_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let url = Url::parse(&format!("http://{addr}")).expect("url");

    let err = mailer(&url).send(&sample_email()).await.expect_err("should fail");
    assert!(matches!(err, MailError::Transport(_)));
}
