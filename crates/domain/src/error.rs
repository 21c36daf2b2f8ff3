//! Common error types used across the workspace.
//!
//! Adapter-specific failures are boxed into the [`RequestError`] variants at
//! the port boundary. Invalid domain values are reported as
//! [`ValidationError`].

/// Boxed source error carried across port boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure of a single HTTP/JSON exchange with the backend.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The backend answered with a status outside the success range.
    #[error("HTTP {status}")]
    Status { status: u16 },

    /// The request never produced a response (connect, timeout, …).
    #[error("transport failure")]
    Transport(#[source] BoxError),

    /// The response body was not valid JSON.
    #[error("malformed response body")]
    Decode(#[source] BoxError),

    /// No absolute URL could be built for the request path.
    #[error("no usable origin for {0}")]
    InvalidUrl(String),
}

impl RequestError {
    /// The HTTP status code, when the failure came from a non-success response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            _ => None,
        }
    }
}

/// Domain invariant violations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("device id must not be empty")]
    EmptyDeviceId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_status_code() {
        let err = RequestError::Status { status: 500 };
        assert_eq!(err.to_string(), "HTTP 500");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn should_not_report_status_for_transport_errors() {
        let err = RequestError::Transport("connection refused".into());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn should_keep_source_of_decode_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{{bad").unwrap_err();
        let err = RequestError::Decode(Box::new(json_err));
        assert!(std::error::Error::source(&err).is_some());
    }
}
