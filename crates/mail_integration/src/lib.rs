//! Outbound email dispatch for contact submissions.
//!
//! The server talks to the provider only through [`Mailer`], so handlers can
//! be exercised against an in-memory fake.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod resend;

pub use resend::{ResendMailer, DEFAULT_RESEND_API_URL};

/// A fully rendered message, in the provider's JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Acceptance acknowledgment. Acceptance does not imply delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub id: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    /// The provider answered with an error object.
    #[error("provider rejected message ({status} {name}): {message}")]
    Rejected {
        status: u16,
        name: String,
        message: String,
    },
    #[error("mail transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected provider response: {0}")]
    UnexpectedResponse(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, MailError>;
}
