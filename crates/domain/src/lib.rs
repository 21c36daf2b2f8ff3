//! # homedash-domain
//!
//! Pure domain model for the homedash sensor dashboard.
//!
//! ## Responsibilities
//! - Foundational types: device identity, error conventions
//! - Define **telemetry readings** (temperature, humidity, motion) and how
//!   they are rendered into display text
//! - Define **control commands** (LEDs, door) and the backend's
//!   acknowledgement and control listing
//! - Define the **display fields** a host renders into
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod control;
pub mod device;
pub mod display;
pub mod telemetry;
