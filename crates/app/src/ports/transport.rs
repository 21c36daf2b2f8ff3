//! Transport port — JSON over HTTP against the backend proxy.

use std::future::Future;

use homedash_domain::error::RequestError;
use serde_json::Value;

/// Issues JSON requests to paths relative to a configured base origin.
///
/// Implementations fail with [`RequestError::Status`] when the response
/// status is outside the success range, and otherwise return the parsed
/// body.
pub trait JsonTransport: Send + Sync {
    /// `GET base + path` and parse the response body.
    fn get_json(&self, path: &str) -> impl Future<Output = Result<Value, RequestError>> + Send;

    /// `POST base + path` with a JSON body and parse the response body.
    fn post_json(
        &self,
        path: &str,
        body: Value,
    ) -> impl Future<Output = Result<Value, RequestError>> + Send;
}

impl<T: JsonTransport> JsonTransport for std::sync::Arc<T> {
    fn get_json(&self, path: &str) -> impl Future<Output = Result<Value, RequestError>> + Send {
        (**self).get_json(path)
    }

    fn post_json(
        &self,
        path: &str,
        body: Value,
    ) -> impl Future<Output = Result<Value, RequestError>> + Send {
        (**self).post_json(path, body)
    }
}
