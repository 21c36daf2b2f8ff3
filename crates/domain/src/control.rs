//! Desired actuator state sent to the device, and the replies to it.

use serde::Serialize;
use serde_json::Value;

use crate::device::DeviceId;

/// Identifies one user-facing control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    Led1,
    Led2,
    Door,
    DoorAngle,
}

impl ControlId {
    /// Name used by the backend in its control listing.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Led1 => "led1",
            Self::Led2 => "led2",
            Self::Door => "door_open",
            Self::DoorAngle => "door_angle",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "led1" => Some(Self::Led1),
            "led2" => Some(Self::Led2),
            "door_open" => Some(Self::Door),
            "door_angle" => Some(Self::DoorAngle),
            _ => None,
        }
    }
}

/// Raw control state as read from the host, before parsing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControlInputs {
    pub led1: bool,
    pub led2: bool,
    pub door_open: bool,
    /// Door angle exactly as typed by the user.
    pub door_angle: String,
}

/// Body of `POST /api/control`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlCommand {
    #[serde(rename = "device")]
    pub device_id: DeviceId,
    pub led1: bool,
    pub led2: bool,
    pub door_open: bool,
    pub door_angle: i64,
}

impl ControlCommand {
    /// Build a command from the current control inputs.
    #[must_use]
    pub fn from_inputs(device_id: DeviceId, inputs: &ControlInputs) -> Self {
        Self {
            device_id,
            led1: inputs.led1,
            led2: inputs.led2,
            door_open: inputs.door_open,
            door_angle: parse_door_angle(&inputs.door_angle),
        }
    }
}

/// Parse the leading base-10 integer of `text`, falling back to 0.
///
/// Leading whitespace and a single sign are accepted, trailing garbage is
/// ignored (`"45deg"` is 45, `"3.9"` is 3). Text without leading digits
/// yields 0. Values beyond `i64` saturate.
#[must_use]
pub fn parse_door_angle(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(byte - b'0');
        value = value.saturating_mul(10).saturating_add(digit);
    }

    if negative { -value } else { value }
}

/// Backend acknowledgement of a control submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControlResult {
    pub updated_at: Option<String>,
}

impl ControlResult {
    /// Extract the acknowledgement timestamp from `updated` or, failing
    /// that, from `controls.updated_at`. Empty strings count as missing.
    #[must_use]
    pub fn from_body(body: &Value) -> Self {
        let top_level = body.get("updated").and_then(non_empty_str);
        let nested = || {
            body.get("controls")
                .and_then(|controls| controls.get("updated_at"))
                .and_then(non_empty_str)
        };
        Self {
            updated_at: top_level.or_else(nested),
        }
    }
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Desired control state as reported by `GET /api/control?device=<id>`.
///
/// Controls the backend did not mention stay `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControlSnapshot {
    pub led1: Option<bool>,
    pub led2: Option<bool>,
    pub door_open: Option<bool>,
    pub door_angle: Option<i64>,
}

impl ControlSnapshot {
    /// Parse the backend's `[{"control": "led1", "value": true}, …]` listing.
    ///
    /// Returns `None` when the body is not an array. Unknown controls and
    /// values of the wrong type are skipped.
    #[must_use]
    pub fn from_body(body: &Value) -> Option<Self> {
        let entries = body.as_array()?;
        let mut snapshot = Self::default();
        for entry in entries {
            let Some(control) = entry
                .get("control")
                .and_then(Value::as_str)
                .and_then(ControlId::from_key)
            else {
                continue;
            };
            let value = entry.get("value").unwrap_or(&Value::Null);
            match control {
                ControlId::Led1 => snapshot.led1 = value.as_bool(),
                ControlId::Led2 => snapshot.led2 = value.as_bool(),
                ControlId::Door => snapshot.door_open = value.as_bool(),
                ControlId::DoorAngle => snapshot.door_angle = value.as_i64(),
            }
        }
        Some(snapshot)
    }

    /// Whether the backend reported no known control at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay this snapshot on `inputs`, keeping unset controls as they are.
    pub fn apply_to(&self, inputs: &mut ControlInputs) {
        if let Some(led1) = self.led1 {
            inputs.led1 = led1;
        }
        if let Some(led2) = self.led2 {
            inputs.led2 = led2;
        }
        if let Some(door_open) = self.door_open {
            inputs.door_open = door_open;
        }
        if let Some(angle) = self.door_angle {
            inputs.door_angle = angle.to_string();
        }
    }
}
