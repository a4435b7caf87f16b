use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{contact_route, SubmissionRequest, SubmissionResult};
use tracing::debug;
use url::Url;

use crate::error::TransportError;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// What came back from the server, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    /// `None` when the body was not a [`SubmissionResult`].
    pub body: Option<SubmissionResult>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn post_submission(
        &self,
        request: &SubmissionRequest,
    ) -> Result<TransportResponse, TransportError>;
}

pub struct HttpTransport {
    http: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(server_url: &str) -> Result<Self, TransportError> {
        Self::with_timeout(server_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(server_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let base = Url::parse(server_url.trim())
            .map_err(|_| TransportError::InvalidEndpoint(server_url.to_string()))?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: format!("{}{}", base.as_str().trim_end_matches('/'), contact_route()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionTransport for HttpTransport {
    async fn post_submission(
        &self,
        request: &SubmissionRequest,
    ) -> Result<TransportResponse, TransportError> {
        let response = self.http.post(&self.endpoint).json(request).send().await?;
        let status = response.status().as_u16();
        let body = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice(&bytes).ok(),
            Err(error) => {
                debug!(%error, "failed to read contact response body");
                None
            }
        };
        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
