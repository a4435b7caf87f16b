use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::{DeliveryReceipt, MailError, Mailer, OutboundEmail};

pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderErrorBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// [`Mailer`] backed by the Resend REST API.
pub struct ResendMailer {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl ResendMailer {
    pub fn new(api_key: impl Into<String>, api_url: &Url, timeout: Duration) -> Result<Self, MailError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/emails", api_url.as_str().trim_end_matches('/')),
            api_key: api_key.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for ResendMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendMailer")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, MailError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let body: ProviderErrorBody = serde_json::from_str(&raw).unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                name: body.name.unwrap_or_else(|| "unknown_error".to_string()),
                message: body.message.unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                }),
            });
        }

        let receipt: DeliveryReceipt = response
            .json()
            .await
            .map_err(|e| MailError::UnexpectedResponse(e.to_string()))?;
        debug!(email_id = %receipt.id, "provider accepted message");
        Ok(receipt)
    }
}

#[cfg(test)]
#[path = "tests/resend_tests.rs"]
mod tests;
