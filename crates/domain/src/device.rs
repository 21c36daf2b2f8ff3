//! Device identity — the single remote device a dashboard session talks to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Device id used when none is configured.
pub const DEFAULT_DEVICE_ID: &str = "esp32-1";

/// Name of a remote device as known by the backend (e.g. `esp32-1`).
///
/// Always non-blank. Serialises as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceId(String);

impl DeviceId {
    /// Wrap a device name, rejecting empty or whitespace-only values.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyDeviceId`] when `name` is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyDeviceId);
        }
        Ok(Self(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id percent-encoded for use as a query parameter value.
    #[must_use]
    pub fn query_value(&self) -> String {
        encode_query_value(&self.0)
    }
}

impl Default for DeviceId {
    fn default() -> Self {
        Self(DEFAULT_DEVICE_ID.to_string())
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DeviceId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DeviceId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeviceId> for String {
    fn from(id: DeviceId) -> Self {
        id.0
    }
}

/// Percent-encode a query parameter value (keeps RFC 3986 unreserved bytes).
fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_esp32_1() {
        assert_eq!(DeviceId::default().as_str(), "esp32-1");
    }

    #[test]
    fn should_reject_blank_device_id() {
        assert_eq!(DeviceId::new("   "), Err(ValidationError::EmptyDeviceId));
        assert_eq!(DeviceId::new(""), Err(ValidationError::EmptyDeviceId));
    }

    #[test]
    fn should_parse_from_str() {
        let id: DeviceId = "kitchen-node".parse().unwrap();
        assert_eq!(id.to_string(), "kitchen-node");
    }

    #[test]
    fn should_leave_plain_ids_unencoded() {
        assert_eq!(DeviceId::default().query_value(), "esp32-1");
    }

    #[test]
    fn should_encode_reserved_characters() {
        let id = DeviceId::new("a b&c=d+e").unwrap();
        assert_eq!(id.query_value(), "a%20b%26c%3Dd%2Be");
    }

    #[test]
    fn should_reject_blank_id_when_deserializing() {
        let result: Result<DeviceId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn should_serialize_as_plain_string() {
        let json = serde_json::to_string(&DeviceId::default()).unwrap();
        assert_eq!(json, "\"esp32-1\"");
    }
}
