//! # homedash-app
//!
//! Application layer — use-cases, scheduling and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `JsonTransport` — JSON requests against the backend proxy
//!   - `DisplaySink` — text output for the dashboard's named fields
//!   - `ControlPanel` — the host's control inputs
//! - Define the **use-cases** in `DashboardClient`: load telemetry, apply
//!   controls, load metrics, sync controls
//! - Provide **in-process infrastructure** that doesn't need IO: the
//!   cancellable `Poller`, UI event dispatch, and the `Dashboard` session
//!
//! ## Dependency rule
//! Depends on `homedash-domain` only (plus `tokio` for tasks and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod dashboard;
pub mod ports;
pub mod scheduler;
pub mod services;
pub mod ui;

#[cfg(test)]
mod testing;
