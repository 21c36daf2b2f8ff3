//! # homedash-adapter-terminal
//!
//! Terminal host for the dashboard.
//!
//! ## Provided adapters
//!
//! | Adapter | Port | Behaviour |
//! |---------|------|-----------|
//! | `TerminalDisplay` | `DisplaySink` | Prints a timestamped line whenever a field changes |
//! | `TerminalControlPanel` | `ControlPanel` | Holds control state changed by line commands |
//!
//! `run_commands` feeds a line stream (usually stdin) into the control panel
//! and forwards the resulting UI events.
//!
//! ## Dependency rule
//!
//! Depends on `homedash-app` (port traits) and `homedash-domain` only.

pub mod commands;
pub mod control_panel;
pub mod display;

pub use commands::{Command, CommandError, HELP};
pub use control_panel::{TerminalControlPanel, run_commands};
pub use display::TerminalDisplay;
