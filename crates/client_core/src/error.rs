use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("invalid server url '{0}'")]
    InvalidEndpoint(String),
    #[error("request timed out")]
    Timeout,
    #[error("could not connect to server")]
    Connect,
    #[error("request failed: {0}")]
    Request(String),
}

impl TransportError {
    /// Sentence fit for the form's feedback line, when the failure has one.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            TransportError::Timeout => Some("The request timed out. Please try again."),
            TransportError::Connect => {
                Some("Could not reach the server. Please check your connection and try again.")
            }
            TransportError::InvalidEndpoint(_) | TransportError::Request(_) => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            TransportError::Timeout
        } else if value.is_connect() {
            TransportError::Connect
        } else {
            TransportError::Request(value.to_string())
        }
    }
}
