//! HTTP front for the contact pipeline: settings, shared state, and the router.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use mail_integration::{Mailer, ResendMailer};
use server_api::{ContactContext, EmailComposer, Envelope};
use shared::protocol::contact_route;
use tracing::{info, warn};

mod api;
pub mod app_state;
pub mod config;

pub use app_state::AppState;
use config::Settings;

pub fn build_state(settings: &Settings) -> anyhow::Result<AppState> {
    let composer = EmailComposer::new(Envelope {
        from: settings.mail_from.clone(),
        to: settings.mail_to.clone(),
        subject_tag: settings.subject_tag.clone(),
    })
    .context("failed to load contact email templates")?;

    let mailer: Option<Arc<dyn Mailer>> = match &settings.resend_api_key {
        Some(api_key) => {
            let api_url = settings.resend_api_url()?;
            let mailer = ResendMailer::new(api_key.as_str(), &api_url, settings.mail_timeout())
                .context("failed to build mail client")?;
            info!(endpoint = mailer.endpoint(), "email delivery configured");
            Some(Arc::new(mailer) as Arc<dyn Mailer>)
        }
        None => {
            warn!("RESEND_API_KEY is not set; contact submissions will be answered with 500");
            None
        }
    };

    Ok(AppState {
        contact: ContactContext {
            mailer,
            composer: Arc::new(composer),
        },
    })
}

pub fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(api::healthz))
        .route(contact_route(), post(api::contact))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
