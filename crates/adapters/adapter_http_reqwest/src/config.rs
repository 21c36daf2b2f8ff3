//! HTTP transport configuration.

use serde::Deserialize;

/// Configuration for the reqwest transport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Origin every request path is appended to (e.g. `http://127.0.0.1:5000`).
    ///
    /// One trailing `/` is stripped. Empty means paths are used as-is,
    /// which only works once an origin is supplied.
    pub base_url: String,
    /// Per-request timeout in seconds; `None` leaves it to the transport.
    pub timeout_secs: Option<u64>,
}
