//! HTTP adapter error types.

use homedash_domain::error::RequestError;

/// Errors specific to the reqwest transport.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The reqwest client could not be built.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request did not produce a response.
    #[error("request failed")]
    Transport(#[source] reqwest::Error),

    /// The response status is outside the success range.
    #[error("HTTP {0}")]
    Status(u16),

    /// The response body is not JSON.
    #[error("response body is not JSON")]
    Decode(#[source] serde_json::Error),

    /// The base origin plus path does not form an absolute URL.
    #[error("no usable origin for {0}")]
    RelativeUrl(String),
}

impl From<HttpError> for RequestError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Client(source) | HttpError::Transport(source) => {
                Self::Transport(Box::new(source))
            }
            HttpError::Status(status) => Self::Status { status },
            HttpError::Decode(source) => Self::Decode(Box::new(source)),
            HttpError::RelativeUrl(path) => Self::InvalidUrl(path),
        }
    }
}
