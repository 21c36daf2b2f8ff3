//! # homedash-adapter-http-reqwest
//!
//! HTTP adapter implementing the `JsonTransport` port with
//! [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Prefix request paths with the configured base origin
//! - Reject non-success statuses with the status code
//! - Parse response bodies as JSON
//!
//! ## Dependency rule
//! Depends on `homedash-app` (for port traits) and `homedash-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod config;
pub mod error;

use std::future::Future;
use std::time::Duration;

use homedash_app::ports::JsonTransport;
use homedash_domain::error::RequestError;
use reqwest::{RequestBuilder, Url};
use serde_json::Value;

pub use config::HttpConfig;
pub use error::HttpError;

/// [`JsonTransport`] backed by a pooled reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Build a transport with its own client.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Client`] if the reqwest client cannot be built.
    pub fn new(config: &HttpConfig) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(HttpError::Client)?;
        Ok(Self::with_client(client, &config.base_url))
    }

    /// Build a transport around an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    /// Join the base origin and `path`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::RelativeUrl`] when the result is not absolute.
    pub fn url_for(&self, path: &str) -> Result<Url, HttpError> {
        let joined = if self.base_url.is_empty() {
            path.to_string()
        } else {
            let base = self.base_url.strip_suffix('/').unwrap_or(&self.base_url);
            format!("{base}{path}")
        };
        Url::parse(&joined).map_err(|_| HttpError::RelativeUrl(joined))
    }
}

async fn execute(request: RequestBuilder) -> Result<Value, HttpError> {
    let response = request.send().await.map_err(HttpError::Transport)?;
    let status = response.status();
    if !status.is_success() {
        tracing::debug!(url = %response.url(), status = status.as_u16(), "non-success response");
        return Err(HttpError::Status(status.as_u16()));
    }
    let bytes = response.bytes().await.map_err(HttpError::Transport)?;
    serde_json::from_slice(&bytes).map_err(HttpError::Decode)
}

impl JsonTransport for ReqwestTransport {
    fn get_json(&self, path: &str) -> impl Future<Output = Result<Value, RequestError>> + Send {
        let request = self.url_for(path).map(|url| {
            tracing::trace!(%url, "GET");
            self.client.get(url)
        });
        async move { Ok(execute(request?).await?) }
    }

    fn post_json(
        &self,
        path: &str,
        body: Value,
    ) -> impl Future<Output = Result<Value, RequestError>> + Send {
        let request = self.url_for(path).map(|url| {
            tracing::trace!(%url, "POST");
            self.client.post(url).json(&body)
        });
        async move { Ok(execute(request?).await?) }
    }
}
