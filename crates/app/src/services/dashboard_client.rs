//! Dashboard client — the polling and control use-cases.
//!
//! Every operation catches its own failures: errors are logged and turned
//! into the user-visible fallback for that operation, never propagated.

use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use homedash_domain::control::{ControlCommand, ControlResult, ControlSnapshot};
use homedash_domain::device::DeviceId;
use homedash_domain::display::{self, CONTROL_ERROR, Field, NO_DATA};
use homedash_domain::telemetry::{SensorKind, TelemetrySnapshot};
use serde_json::Value;

use crate::ports::{ControlPanel, DisplaySink, JsonTransport};

/// Path control commands are posted to.
pub const CONTROL_PATH: &str = "/api/control";

/// Default page size of the metrics listing.
pub const DEFAULT_METRICS_LIMIT: u32 = 20;

/// Session configuration of a [`DashboardClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Device every request is scoped to.
    pub device_id: DeviceId,
    /// Period of the telemetry poller.
    pub telemetry_interval: Duration,
    /// Period of the metrics poller.
    pub metrics_interval: Duration,
    /// `limit` query parameter of the metrics listing.
    pub metrics_limit: u32,
    /// Pull the backend's control state into the panel on start.
    pub sync_controls: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            device_id: DeviceId::default(),
            telemetry_interval: Duration::from_millis(4000),
            metrics_interval: Duration::from_millis(10_000),
            metrics_limit: DEFAULT_METRICS_LIMIT,
            sync_controls: true,
        }
    }
}

/// What a telemetry load ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryOutcome {
    /// Readings were rendered.
    Rendered,
    /// A request failed; the "updated" fields show the placeholder.
    Failed,
    /// A newer load already rendered; this one was discarded.
    Stale,
}

/// Orders telemetry renders by the time their load started.
#[derive(Default)]
struct RenderOrder {
    issued: AtomicU64,
    rendered: Mutex<u64>,
}

impl RenderOrder {
    fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Run `render` unless a newer ticket already rendered.
    fn render_if_current(&self, ticket: u64, render: impl FnOnce()) -> bool {
        let mut rendered = self.rendered.lock().unwrap_or_else(PoisonError::into_inner);
        if *rendered > ticket {
            return false;
        }
        *rendered = ticket;
        render();
        true
    }
}

/// Application service driving one dashboard session.
pub struct DashboardClient<T, D, C> {
    transport: T,
    display: D,
    controls: C,
    config: DashboardConfig,
    order: RenderOrder,
}

impl<T, D, C> DashboardClient<T, D, C>
where
    T: JsonTransport,
    D: DisplaySink,
    C: ControlPanel,
{
    /// Create a client from its ports and session configuration.
    pub fn new(transport: T, display: D, controls: C, config: DashboardConfig) -> Self {
        Self {
            transport,
            display,
            controls,
            config,
            order: RenderOrder::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    fn device_path(&self, path: &str) -> String {
        format!("{path}?device={}", self.config.device_id.query_value())
    }

    /// Fetch the three sensor readings concurrently and render them.
    ///
    /// The three requests succeed or fail together: on any failure every
    /// "updated" field shows [`NO_DATA`] and no value field is touched.
    pub async fn load_telemetry(&self) -> TelemetryOutcome {
        let ticket = self.order.issue();
        let temp_path = self.device_path(SensorKind::Temperature.path());
        let hum_path = self.device_path(SensorKind::Humidity.path());
        let motion_path = self.device_path(SensorKind::Motion.path());

        let result = tokio::try_join!(
            self.transport.get_json(&temp_path),
            self.transport.get_json(&hum_path),
            self.transport.get_json(&motion_path),
        );

        let outcome = match &result {
            Ok(_) => TelemetryOutcome::Rendered,
            Err(_) => TelemetryOutcome::Failed,
        };
        let current = self.order.render_if_current(ticket, || match result {
            Ok((temp, hum, motion)) => {
                let snapshot = TelemetrySnapshot::from_bodies(&temp, &hum, &motion);
                for (field, text) in snapshot.field_writes() {
                    self.display.set_text(field, &text);
                }
            }
            Err(err) => {
                tracing::error!(error = %err, status = ?err.status(), "telemetry");
                for kind in SensorKind::ALL {
                    self.display.set_text(Field::updated_of(kind), NO_DATA);
                }
            }
        });

        if current {
            outcome
        } else {
            tracing::debug!(ticket, "discarding out-of-order telemetry response");
            TelemetryOutcome::Stale
        }
    }

    /// Submit the current control state and report the result in the
    /// control status field.
    pub async fn apply_control(&self) -> Option<ControlResult> {
        let inputs = self.controls.read_controls();
        let command = ControlCommand::from_inputs(self.config.device_id.clone(), &inputs);
        let body = match serde_json::to_value(&command) {
            Ok(body) => body,
            Err(err) => {
                tracing::error!(error = %err, "control");
                self.display.set_text(Field::ControlStatus, CONTROL_ERROR);
                return None;
            }
        };

        match self.transport.post_json(CONTROL_PATH, body).await {
            Ok(response) => {
                let result = ControlResult::from_body(&response);
                tracing::debug!(updated_at = ?result.updated_at, "control acknowledged");
                self.display.set_text(
                    Field::ControlStatus,
                    &display::control_sent(result.updated_at.as_deref()),
                );
                Some(result)
            }
            Err(err) => {
                tracing::error!(error = %err, status = ?err.status(), "control");
                self.display.set_text(Field::ControlStatus, CONTROL_ERROR);
                None
            }
        }
    }

    /// Fetch the metrics listing and render it pretty-printed.
    ///
    /// Failures are only logged.
    pub async fn load_metrics(&self) -> Option<Value> {
        let path = format!("/api?limit={}", self.config.metrics_limit);
        let data = match self.transport.get_json(&path).await {
            Ok(data) => data,
            Err(err) => {
                tracing::error!(error = %err, status = ?err.status(), "metrics");
                return None;
            }
        };

        match serde_json::to_string_pretty(&data) {
            Ok(text) => self.display.set_text(Field::MetricsJson, &text),
            Err(err) => tracing::error!(error = %err, "metrics"),
        }
        Some(data)
    }

    /// Pull the backend's desired control state into the control panel.
    ///
    /// Failures and unexpected listings are only logged.
    pub async fn sync_controls(&self) -> Option<ControlSnapshot> {
        let path = self.device_path(CONTROL_PATH);
        let body = match self.transport.get_json(&path).await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(error = %err, status = ?err.status(), "control sync");
                return None;
            }
        };

        let Some(snapshot) = ControlSnapshot::from_body(&body) else {
            tracing::warn!("control sync: expected an array of controls");
            return None;
        };
        if snapshot.is_empty() {
            tracing::debug!("control sync: backend has no state for this device yet");
        } else {
            self.controls.apply_snapshot(&snapshot);
        }
        Some(snapshot)
    }
}
