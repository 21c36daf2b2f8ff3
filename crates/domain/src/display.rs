//! Named text slots a host renders the dashboard into.
//!
//! Every field has a stable string id (`temp-value`, `control-status`, …)
//! used as its label when rendered.

use std::fmt;

use crate::telemetry::SensorKind;

/// Placeholder written to every "updated" field when a telemetry load fails.
pub const NO_DATA: &str = "no data";

/// Placeholder for a missing timestamp on a successful reading.
pub const MISSING_TIMESTAMP: &str = "-";

/// Status text written when a control submission fails.
pub const CONTROL_ERROR: &str = "Error sending";

/// Fallback shown in the control status when the backend omits a timestamp.
pub const CONTROL_NOW: &str = "now";

/// A named text slot on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    TempValue,
    TempUpdated,
    HumValue,
    HumUpdated,
    MotionValue,
    MotionUpdated,
    ControlStatus,
    MetricsJson,
}

impl Field {
    /// Stable string id of the field.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::TempValue => "temp-value",
            Self::TempUpdated => "temp-updated",
            Self::HumValue => "hum-value",
            Self::HumUpdated => "hum-updated",
            Self::MotionValue => "motion-value",
            Self::MotionUpdated => "motion-updated",
            Self::ControlStatus => "control-status",
            Self::MetricsJson => "metrics-json",
        }
    }

    /// Field holding the rendered value of a sensor.
    #[must_use]
    pub fn value_of(kind: SensorKind) -> Self {
        match kind {
            SensorKind::Temperature => Self::TempValue,
            SensorKind::Humidity => Self::HumValue,
            SensorKind::Motion => Self::MotionValue,
        }
    }

    /// Field holding the "last updated" timestamp of a sensor.
    #[must_use]
    pub fn updated_of(kind: SensorKind) -> Self {
        match kind {
            SensorKind::Temperature => Self::TempUpdated,
            SensorKind::Humidity => Self::HumUpdated,
            SensorKind::Motion => Self::MotionUpdated,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Status text for a successful control submission.
#[must_use]
pub fn control_sent(updated_at: Option<&str>) -> String {
    format!("Sent ({})", updated_at.unwrap_or(CONTROL_NOW))
}
