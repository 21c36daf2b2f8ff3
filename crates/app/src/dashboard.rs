//! Startup sequence and teardown of a dashboard session.
//!
//! Startup order:
//!
//! 1. wire UI events to [`DashboardClient::apply_control`]
//! 2. optionally pull the backend's control state into the panel, on its own
//!    task so a slow backend does not hold back the first loads
//! 3. start the telemetry and metrics pollers; both run once immediately
//!    and then on their configured period
//!
//! [`Dashboard::shutdown`] cancels every task and waits for it to finish.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::ports::{ControlPanel, DisplaySink, JsonTransport};
use crate::scheduler::Poller;
use crate::services::dashboard_client::DashboardClient;
use crate::ui::{UiEvent, wire_ui};

/// A running dashboard session.
pub struct Dashboard {
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl Dashboard {
    /// Start a session for `client`, listening for UI events on `events`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn start<T, D, C>(
        client: Arc<DashboardClient<T, D, C>>,
        events: mpsc::Receiver<UiEvent>,
    ) -> Self
    where
        T: JsonTransport + 'static,
        D: DisplaySink + 'static,
        C: ControlPanel + 'static,
    {
        let cancel = CancellationToken::new();
        let mut tasks = Vec::with_capacity(4);

        tasks.push(wire_ui(events, cancel.child_token(), {
            let client = Arc::clone(&client);
            move || {
                let client = Arc::clone(&client);
                async move {
                    client.apply_control().await;
                }
            }
        }));

        if client.config().sync_controls {
            let client = Arc::clone(&client);
            let cancel = cancel.child_token();
            tasks.push(tokio::spawn(async move {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => {}
                    _ = client.sync_controls() => {}
                }
            }));
        }

        let telemetry = Poller::new("telemetry", client.config().telemetry_interval);
        tasks.push(telemetry.start(cancel.child_token(), {
            let client = Arc::clone(&client);
            move || {
                let client = Arc::clone(&client);
                async move {
                    client.load_telemetry().await;
                }
            }
        }));

        let metrics = Poller::new("metrics", client.config().metrics_interval);
        tasks.push(metrics.start(cancel.child_token(), {
            let client = Arc::clone(&client);
            move || {
                let client = Arc::clone(&client);
                async move {
                    client.load_metrics().await;
                }
            }
        }));

        tracing::info!(device = %client.config().device_id, "dashboard started");
        Self { cancel, tasks }
    }

    /// Token cancelled when the session shuts down; hosts can tie their own
    /// tasks (input readers, renderers) to it.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stop every task of the session and wait for them to finish.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        for task in self.tasks {
            if let Err(err) = task.await {
                tracing::warn!(error = %err, "dashboard task ended abnormally");
            }
        }
        tracing::info!("dashboard stopped");
    }
}
