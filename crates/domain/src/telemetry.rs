//! The three sensor readings a device reports.
//!
//! Readings are ephemeral: each poll parses them from the backend's JSON,
//! renders them into display text and drops them. Unexpected shapes are
//! tolerated: a body that is not an object, or an object without the sensor
//! key, simply yields an absent reading.

use serde_json::Value;

use crate::display::{Field, MISSING_TIMESTAMP};

/// The sensors polled by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    Temperature,
    Humidity,
    Motion,
}

impl SensorKind {
    /// All sensors, in request order.
    pub const ALL: [Self; 3] = [Self::Temperature, Self::Humidity, Self::Motion];

    /// Key of the value in the backend's response body.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Temperature => "temp",
            Self::Humidity => "hum",
            Self::Motion => "motion",
        }
    }

    /// Endpoint path (without query string).
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Temperature => "/api/temp",
            Self::Humidity => "/api/hum",
            Self::Motion => "/api/motion",
        }
    }
}

/// A sensor value as reported by the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorValue {
    Number(f64),
    Text(String),
    Flag(bool),
    /// Arrays and objects, passed through as JSON text.
    Other(Value),
}

impl SensorValue {
    /// Convert a JSON value; `null` is treated as absent.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(flag) => Some(Self::Flag(*flag)),
            Value::Number(n) => n.as_f64().map(Self::Number),
            Value::String(s) => Some(Self::Text(s.clone())),
            other => Some(Self::Other(other.clone())),
        }
    }

    /// Display text: numbers with one decimal place, anything else unchanged.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::Number(n) => one_decimal(*n),
            Self::Text(s) => s.clone(),
            Self::Flag(flag) => flag.to_string(),
            Self::Other(value) => value.to_string(),
        }
    }

    /// Loose boolean reading used for motion (`0`, `""` and `false` are off).
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::Flag(flag) => *flag,
            Self::Other(_) => true,
        }
    }
}

/// Format `n` with one decimal place, rounding exact ties away from zero.
///
/// Only multiples of 0.25 with an odd quarter (x.25, x.75) sit exactly
/// halfway between two tenths; every other value has a nearest tenth in its
/// exact decimal expansion, which `{:.1}` already finds. Negative zero
/// prints as `0.0`.
fn one_decimal(n: f64) -> String {
    let n = if n == 0.0 { 0.0 } else { n };
    let quarters = n * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        let rounded = (n * 10.0).round() / 10.0;
        return format!("{rounded:.1}");
    }
    format!("{n:.1}")
}

/// One sensor's reading: an optional value and an optional timestamp.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TelemetryReading {
    pub value: Option<SensorValue>,
    pub timestamp: Option<String>,
}

impl TelemetryReading {
    /// Extract the reading for `kind` from a response body.
    #[must_use]
    pub fn from_body(kind: SensorKind, body: &Value) -> Self {
        let value = body.get(kind.key()).and_then(SensorValue::from_json);
        let timestamp = body.get("timestamp").and_then(timestamp_text);
        Self { value, timestamp }
    }

    /// Text for the value field, or `None` when the value is absent.
    #[must_use]
    pub fn value_text(&self, kind: SensorKind) -> Option<String> {
        let value = self.value.as_ref()?;
        let text = match kind {
            SensorKind::Temperature => format!("{} C", value.display_text()),
            SensorKind::Humidity => format!("{} %", value.display_text()),
            SensorKind::Motion => {
                if value.is_truthy() {
                    "Activo".to_string()
                } else {
                    "Inactivo".to_string()
                }
            }
        };
        Some(text)
    }

    /// Text for the "updated" field.
    #[must_use]
    pub fn updated_text(&self) -> &str {
        self.timestamp.as_deref().unwrap_or(MISSING_TIMESTAMP)
    }
}

/// Timestamps are usually strings; empty strings, `0`, `false` and `null`
/// count as missing.
fn timestamp_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => number_text(n),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Zero is `None`; whole floats print without a fractional part.
fn number_text(n: &serde_json::Number) -> Option<String> {
    match n.as_f64() {
        Some(f) if f == 0.0 => None,
        Some(f) if n.is_f64() && f.fract() == 0.0 => Some(format!("{f:.0}")),
        _ => Some(n.to_string()),
    }
}

/// The three readings of one telemetry poll.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TelemetrySnapshot {
    pub temperature: TelemetryReading,
    pub humidity: TelemetryReading,
    pub motion: TelemetryReading,
}

impl TelemetrySnapshot {
    /// Build a snapshot from the three response bodies.
    #[must_use]
    pub fn from_bodies(temperature: &Value, humidity: &Value, motion: &Value) -> Self {
        Self {
            temperature: TelemetryReading::from_body(SensorKind::Temperature, temperature),
            humidity: TelemetryReading::from_body(SensorKind::Humidity, humidity),
            motion: TelemetryReading::from_body(SensorKind::Motion, motion),
        }
    }

    #[must_use]
    pub fn reading(&self, kind: SensorKind) -> &TelemetryReading {
        match kind {
            SensorKind::Temperature => &self.temperature,
            SensorKind::Humidity => &self.humidity,
            SensorKind::Motion => &self.motion,
        }
    }

    /// Field writes for this snapshot. Sensors with an absent value produce
    /// no writes at all.
    #[must_use]
    pub fn field_writes(&self) -> Vec<(Field, String)> {
        let mut writes = Vec::with_capacity(6);
        for kind in SensorKind::ALL {
            let reading = self.reading(kind);
            if let Some(text) = reading.value_text(kind) {
                writes.push((Field::value_of(kind), text));
                writes.push((Field::updated_of(kind), reading.updated_text().to_string()));
            }
        }
        writes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_round_temperature_to_one_decimal() {
        let reading =
            TelemetryReading::from_body(SensorKind::Temperature, &json!({"temp": 21.456}));
        assert_eq!(
            reading.value_text(SensorKind::Temperature).as_deref(),
            Some("21.5 C")
        );
    }

    #[test]
    fn should_round_ties_away_from_zero() {
        let text = |n: f64| SensorValue::Number(n).display_text();
        assert_eq!(text(21.25), "21.3");
        assert_eq!(text(21.75), "21.8");
        assert_eq!(text(0.25), "0.3");
        assert_eq!(text(-21.25), "-21.3");
        assert_eq!(
            TelemetryReading::from_body(SensorKind::Temperature, &json!({"temp": 21.25}))
                .value_text(SensorKind::Temperature)
                .as_deref(),
            Some("21.3 C")
        );
    }

    #[test]
    fn should_round_near_ties_by_their_exact_value() {
        let text = |n: f64| SensorValue::Number(n).display_text();
        // 0.35 and 1.45 are stored just below the halfway point
        assert_eq!(text(0.35), "0.3");
        assert_eq!(text(1.45), "1.4");
        assert_eq!(text(21.5), "21.5");
    }

    #[test]
    fn should_print_negative_zero_as_zero() {
        let reading = TelemetryReading::from_body(SensorKind::Humidity, &json!({"hum": -0.0}));
        assert_eq!(
            reading.value_text(SensorKind::Humidity).as_deref(),
            Some("0.0 %")
        );
    }

    #[test]
    fn should_pad_integer_humidity_to_one_decimal() {
        let reading = TelemetryReading::from_body(SensorKind::Humidity, &json!({"hum": 55}));
        assert_eq!(
            reading.value_text(SensorKind::Humidity).as_deref(),
            Some("55.0 %")
        );
    }

    #[test]
    fn should_pass_string_values_through_unchanged() {
        let reading =
            TelemetryReading::from_body(SensorKind::Temperature, &json!({"temp": "21.456"}));
        assert_eq!(
            reading.value_text(SensorKind::Temperature).as_deref(),
            Some("21.456 C")
        );
    }

    #[test]
    fn should_render_motion_as_active_or_inactive() {
        let on = TelemetryReading::from_body(SensorKind::Motion, &json!({"motion": true}));
        let off = TelemetryReading::from_body(SensorKind::Motion, &json!({"motion": 0}));
        assert_eq!(on.value_text(SensorKind::Motion).as_deref(), Some("Activo"));
        assert_eq!(off.value_text(SensorKind::Motion).as_deref(), Some("Inactivo"));
    }

    #[test]
    fn should_treat_null_value_as_absent() {
        let reading = TelemetryReading::from_body(
            SensorKind::Humidity,
            &json!({"hum": null, "timestamp": "12:00"}),
        );
        assert_eq!(reading.value, None);
        assert_eq!(reading.value_text(SensorKind::Humidity), None);
    }

    #[test]
    fn should_tolerate_non_object_bodies() {
        let reading = TelemetryReading::from_body(SensorKind::Temperature, &json!([1, 2, 3]));
        assert_eq!(reading, TelemetryReading::default());
    }

    #[test]
    fn should_use_dash_when_timestamp_missing_or_empty() {
        let missing = TelemetryReading::from_body(SensorKind::Temperature, &json!({"temp": 1}));
        let empty = TelemetryReading::from_body(
            SensorKind::Temperature,
            &json!({"temp": 1, "timestamp": ""}),
        );
        assert_eq!(missing.updated_text(), "-");
        assert_eq!(empty.updated_text(), "-");
    }

    #[test]
    fn should_treat_zero_timestamp_as_missing() {
        for timestamp in [json!(0), json!(0.0), json!(false)] {
            let reading = TelemetryReading::from_body(
                SensorKind::Temperature,
                &json!({"temp": 1, "timestamp": timestamp}),
            );
            assert_eq!(reading.updated_text(), "-");
        }
    }

    #[test]
    fn should_print_numeric_timestamps_like_integers_when_whole() {
        let whole = TelemetryReading::from_body(
            SensorKind::Motion,
            &json!({"motion": 1, "timestamp": 1_714_550_400.0}),
        );
        let epoch = TelemetryReading::from_body(
            SensorKind::Motion,
            &json!({"motion": 1, "timestamp": 1_714_550_400}),
        );
        let fractional = TelemetryReading::from_body(
            SensorKind::Motion,
            &json!({"motion": 1, "timestamp": 12.5}),
        );
        assert_eq!(whole.updated_text(), "1714550400");
        assert_eq!(epoch.updated_text(), "1714550400");
        assert_eq!(fractional.updated_text(), "12.5");
    }

    #[test]
    fn should_produce_writes_for_every_present_sensor() {
        let snapshot = TelemetrySnapshot::from_bodies(
            &json!({"temp": 21.456, "timestamp": "12:00"}),
            &json!({"hum": 55.2, "timestamp": "12:00"}),
            &json!({"motion": true, "timestamp": "12:00"}),
        );
        assert_eq!(
            snapshot.field_writes(),
            vec![
                (Field::TempValue, "21.5 C".to_string()),
                (Field::TempUpdated, "12:00".to_string()),
                (Field::HumValue, "55.2 %".to_string()),
                (Field::HumUpdated, "12:00".to_string()),
                (Field::MotionValue, "Activo".to_string()),
                (Field::MotionUpdated, "12:00".to_string()),
            ]
        );
    }

    #[test]
    fn should_skip_writes_for_absent_sensor() {
        let snapshot = TelemetrySnapshot::from_bodies(
            &json!({"temp": 20.0, "timestamp": "12:00"}),
            &json!({"timestamp": "12:00"}),
            &json!({"motion": false}),
        );
        let fields: Vec<Field> = snapshot.field_writes().into_iter().map(|(f, _)| f).collect();
        assert_eq!(
            fields,
            vec![
                Field::TempValue,
                Field::TempUpdated,
                Field::MotionValue,
                Field::MotionUpdated
            ]
        );
    }
}
