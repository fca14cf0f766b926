//! # DisLogger Monitor
//!
//! Long-running probes that report through a [`dislogger_logging::Logger`].
//!
//! ## Monitors
//!
//! - [`LivenessMonitor`]: presence of a network address, with a grace window
//!   and rate-limited reporting
//! - [`ResourceMonitor`]: CPU (per core) or memory utilisation against a
//!   warning threshold
//!
//! Each monitor runs on its own tokio task owned by a [`Monitor`], which
//! provides the start / blocking-stop lifecycle.

pub mod config;
pub mod error;
pub mod liveness;
pub mod monitor;
pub mod resource;

pub use config::{LivenessConfig, ResourceConfig};
pub use error::MonitorError;
pub use liveness::{ArpingProbe, LivenessMonitor, Presence, PresenceProbe};
pub use monitor::{Monitor, MonitorLoop, RunState};
pub use resource::{ResourceKind, ResourceMonitor, ResourceSampler, SystemSampler};
