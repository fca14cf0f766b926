//! Monitor lifecycle.
//!
//! A [`Monitor`] owns one [`MonitorLoop`] and runs it on a dedicated tokio
//! task between `start` and `stop`:
//!
//! ```text
//! Idle --start--> Running --stop--> Stopping --(loop exited)--> Idle
//! ```
//!
//! A monitor runs at most once. After `stop` it stays `Idle` and a new
//! instance has to be built to monitor again.

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use dislogger_logging::Logger;

use crate::error::MonitorError;

/// Run state of a [`Monitor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Stopping,
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::Idle => write!(f, "idle"),
            RunState::Running => write!(f, "running"),
            RunState::Stopping => write!(f, "stopping"),
        }
    }
}

/// The probe side of a monitor: one iteration of work plus its pacing.
#[async_trait]
pub trait MonitorLoop: Send {
    /// Short variant name used in diagnostics.
    fn kind(&self) -> &'static str;

    /// Pause between two iterations.
    fn interval(&self) -> Duration;

    /// Probe, update state and log through `logger` if needed.
    ///
    /// Probe failures are handled here; an iteration never aborts the loop.
    async fn iterate(&mut self, logger: &Logger);
}

/// A supervised monitor: one loop, one task, one logger.
pub struct Monitor {
    name: String,
    logger: Arc<Logger>,
    state: RunState,
    token: CancellationToken,
    worker: Option<Box<dyn MonitorLoop>>,
    task: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for Monitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor")
            .field("name", &self.name)
            .field("logger", &self.logger.name())
            .field("state", &self.state)
            .finish()
    }
}

impl Monitor {
    pub fn new(name: impl Into<String>, logger: Arc<Logger>, worker: Box<dyn MonitorLoop>) -> Self {
        Self {
            name: name.into(),
            logger,
            state: RunState::Idle,
            token: CancellationToken::new(),
            worker: Some(worker),
            task: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// True from `start` until `stop` has fully returned.
    pub fn is_monitoring(&self) -> bool {
        self.state != RunState::Idle
    }

    /// Spawn the probe loop on its own task.
    pub fn start(&mut self) -> Result<(), MonitorError> {
        if self.state != RunState::Idle {
            return Err(MonitorError::AlreadyStarted(self.name.clone()));
        }
        let runtime = Handle::try_current().map_err(|_| MonitorError::NoRuntime(self.name.clone()))?;
        let worker = self
            .worker
            .take()
            .ok_or_else(|| MonitorError::AlreadyStarted(self.name.clone()))?;

        self.logger.info("Started monitoring.");
        info!("Monitor {} ({}) started", self.name, worker.kind());

        let logger = Arc::clone(&self.logger);
        let token = self.token.clone();
        let name = self.name.clone();
        self.task = Some(runtime.spawn(run_loop(name, worker, logger, token)));
        self.state = RunState::Running;
        Ok(())
    }

    /// Request cancellation and wait until the probe loop has exited.
    pub async fn stop(&mut self) -> Result<(), MonitorError> {
        if self.state != RunState::Running {
            return Err(MonitorError::NotRunning(self.name.clone()));
        }
        self.state = RunState::Stopping;
        self.token.cancel();

        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!("Monitor {} loop ended abnormally: {}", self.name, e);
            }
        }

        self.state = RunState::Idle;
        self.logger.info("Stopped monitoring.");
        info!("Monitor {} stopped", self.name);
        Ok(())
    }
}

impl Drop for Monitor {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

async fn run_loop(
    name: String,
    mut worker: Box<dyn MonitorLoop>,
    logger: Arc<Logger>,
    token: CancellationToken,
) {
    debug!("Monitor {} loop entered", name);
    while !token.is_cancelled() {
        worker.iterate(&logger).await;

        tokio::select! {
            _ = token.cancelled() => break,
            _ = tokio::time::sleep(worker.interval()) => {}
        }
    }
    debug!("Monitor {} loop exited", name);
}
