//! Network presence monitoring.
//!
//! Every [`PROBE_INTERVAL`] the address is probed. A failed probe only counts
//! as an outage once the address has not answered for [`GRACE_WINDOW`].
//! Reports go out at most once per [`LOG_INTERVAL`]; the first report of an
//! outage is an error, the following ones are warnings.

#[cfg(test)]
#[path = "liveness_tests.rs"]
mod tests;

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use tokio::process::Command;
use tokio::time::Instant;
use tracing::debug;

use dislogger_logging::Logger;

use crate::config::LivenessConfig;
use crate::error::MonitorError;
use crate::monitor::MonitorLoop;

/// Pause between two probes.
pub const PROBE_INTERVAL: Duration = Duration::from_secs(2);
/// Minimum spacing between two reports.
pub const LOG_INTERVAL: Duration = Duration::from_secs(3);
/// How long an address stays present after its last answer.
pub const GRACE_WINDOW: Duration = Duration::from_secs(300);
/// Upper bound on a single probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sends one presence probe to an address.
#[async_trait]
pub trait PresenceProbe: Send + Sync {
    /// `Ok(true)` if the address answered within `timeout`.
    async fn probe(&self, address: &str, timeout: Duration) -> Result<bool, MonitorError>;
}

/// Probes with the system `arping` tool.
#[derive(Debug, Clone)]
pub struct ArpingProbe {
    program: String,
}

impl ArpingProbe {
    pub fn new() -> Self {
        Self::with_program("arping")
    }

    /// Use a different executable that accepts `-c 1 -w <secs> <address>`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for ArpingProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PresenceProbe for ArpingProbe {
    async fn probe(&self, address: &str, timeout: Duration) -> Result<bool, MonitorError> {
        let deadline = timeout.as_secs().max(1).to_string();
        let status = Command::new(&self.program)
            .args(["-c", "1", "-w", deadline.as_str(), address])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status();

        match tokio::time::timeout(timeout, status).await {
            Ok(Ok(status)) => Ok(status.success()),
            Ok(Err(e)) => Err(MonitorError::Probe(format!(
                "could not run {}: {}",
                self.program, e
            ))),
            Err(_) => Ok(false),
        }
    }
}

/// Outcome of one liveness evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The probe just succeeded.
    Seen,
    /// The probe failed but the last answer is inside the grace window.
    Stale,
    /// No answer for longer than the grace window.
    Absent,
}

/// Tracks the presence of one address.
pub struct LivenessMonitor {
    address: String,
    probe: Arc<dyn PresenceProbe>,
    last_seen: Option<Instant>,
    last_seen_at: DateTime<Local>,
    last_report: Option<Instant>,
    seen_unreported: bool,
    outage_alerted: bool,
}

impl LivenessMonitor {
    pub fn new(address: impl Into<String>, probe: Arc<dyn PresenceProbe>) -> Self {
        Self {
            address: address.into(),
            probe,
            last_seen: None,
            last_seen_at: Local::now(),
            last_report: None,
            seen_unreported: false,
            outage_alerted: false,
        }
    }

    pub fn from_config(
        config: &LivenessConfig,
        probe: Arc<dyn PresenceProbe>,
    ) -> Result<Self, MonitorError> {
        config.validate()?;
        Ok(Self::new(config.ip.trim(), probe))
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Wall-clock time of the last successful probe (or of the first
    /// iteration when none succeeded yet).
    pub fn last_seen_at(&self) -> DateTime<Local> {
        self.last_seen_at
    }

    /// Whether an error has already been reported for the current outage.
    pub fn outage_alerted(&self) -> bool {
        self.outage_alerted
    }

    async fn check(&mut self) -> Presence {
        let started = Instant::now();
        let window_start = *self.last_seen.get_or_insert(started);

        let answered = match tokio::time::timeout(
            PROBE_TIMEOUT,
            self.probe.probe(&self.address, PROBE_TIMEOUT),
        )
        .await
        {
            Ok(Ok(answered)) => answered,
            Ok(Err(e)) => {
                debug!("Probe of {} failed: {}", self.address, e);
                false
            }
            Err(_) => false,
        };

        let now = Instant::now();
        if answered {
            self.last_seen = Some(now);
            self.last_seen_at = Local::now();
            Presence::Seen
        } else if now.duration_since(window_start) <= GRACE_WINDOW {
            Presence::Stale
        } else {
            Presence::Absent
        }
    }

    fn report(&mut self, presence: Presence, logger: &Logger) {
        if presence == Presence::Seen {
            self.outage_alerted = false;
            self.seen_unreported = true;
        }

        let now = Instant::now();
        let may_report = self
            .last_report
            .is_none_or(|last| now.duration_since(last) >= LOG_INTERVAL);
        if !may_report {
            return;
        }

        let since = self.last_seen_at.format(TIMESTAMP_FORMAT);
        match presence {
            Presence::Absent => {
                let msg = format!("{} gave no sign of life since {}", self.address, since);
                self.seen_unreported = false;
                if self.outage_alerted {
                    logger.warning(msg);
                } else {
                    logger.error(msg);
                    self.outage_alerted = true;
                }
            }
            Presence::Seen | Presence::Stale if self.seen_unreported => {
                logger.info(format!(
                    "{} is CONNECTED. Last sign of life: {}",
                    self.address, since
                ));
                self.seen_unreported = false;
            }
            Presence::Seen | Presence::Stale => return,
        }
        self.last_report = Some(now);
    }
}

#[async_trait]
impl MonitorLoop for LivenessMonitor {
    fn kind(&self) -> &'static str {
        "liveness"
    }

    fn interval(&self) -> Duration {
        PROBE_INTERVAL
    }

    async fn iterate(&mut self, logger: &Logger) {
        let presence = self.check().await;
        self.report(presence, logger);
    }
}
