//! # homedashd — homedash terminal dashboard
//!
//! Composition root that wires the adapters together and runs a dashboard
//! session until interrupted.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize logging to stderr
//! - Construct the HTTP transport and the terminal display/control panel
//! - Start the dashboard session (control sync, pollers, UI wiring)
//! - Feed stdin commands into the control panel
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use homedash_adapter_http_reqwest::ReqwestTransport;
use homedash_adapter_terminal::{HELP, TerminalControlPanel, TerminalDisplay, run_commands};
use homedash_app::dashboard::Dashboard;
use homedash_app::services::dashboard_client::DashboardClient;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{Config, LoggingConfig};

/// Capacity of the UI event channel between stdin and the dashboard.
const UI_EVENT_CAPACITY: usize = 16;

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config.logging)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;
    let result = runtime.block_on(run(config));
    // stdin reads park a blocking thread that only returns on the next line
    runtime.shutdown_timeout(Duration::from_millis(100));
    result
}

fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.filter)
        .with_context(|| format!("invalid log filter `{}`", config.filter))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("failed to initialize logging")?;
    Ok(())
}

async fn run(config: Config) -> anyhow::Result<()> {
    // Adapters
    let transport =
        ReqwestTransport::new(&config.http_config()).context("failed to build HTTP client")?;
    let display = Arc::new(TerminalDisplay::new(std::io::stdout()));
    let panel = Arc::new(TerminalControlPanel::default());

    // Service
    let client = Arc::new(DashboardClient::new(
        transport,
        display,
        Arc::clone(&panel),
        config.dashboard_config()?,
    ));
    tracing::info!(
        base_url = %config.api.base_url,
        device = %client.config().device_id,
        "connecting to backend"
    );

    // Session
    let (events_tx, events_rx) = mpsc::channel(UI_EVENT_CAPACITY);
    let dashboard = Dashboard::start(client, events_rx);
    let cancel = dashboard.cancellation_token();

    eprintln!("{HELP}");
    let input = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            let stdin = BufReader::new(tokio::io::stdin());
            run_commands(stdin, &panel, events_tx, std::io::stderr(), cancel).await;
        }
    });

    shutdown_signal().await;
    tracing::info!("shutting down");
    dashboard.shutdown().await;
    input.abort();
    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
