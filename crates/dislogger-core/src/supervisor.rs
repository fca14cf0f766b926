//! Monitor supervisor.
//!
//! Starts every configured monitor on `start_logging` and joins them all on
//! `stop_logging`. Monitors are rebuilt from configuration on each start;
//! a stopped set is dropped.

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info};

use dislogger_monitor::Monitor;

use crate::error::CoreError;
use crate::reporter::StatusReporter;
use crate::resolver::ConfigResolver;

/// Completion notice sent after every monitor has stopped.
pub const STOP_DONE: &str = ":white_check_mark: Stop monitoring systems done.";
/// Sent when `start_logging` is called while monitors are running.
pub const ALREADY_LOGGING: &str = ":warning: Monitoring is already running.";
/// Sent when `stop_logging` is called while nothing runs.
pub const NOT_LOGGING: &str = ":warning: Monitoring is not running.";

pub fn started_message(name: &str) -> String {
    format!(":up: {} started monitoring.", name)
}

pub fn stopped_message(name: &str) -> String {
    format!(":arrow_down: {} stopped monitoring.", name)
}

/// Owns the active monitor set.
pub struct Supervisor {
    resolver: Arc<ConfigResolver>,
    active: Mutex<Option<Vec<Monitor>>>,
}

impl Supervisor {
    pub fn new(resolver: Arc<ConfigResolver>) -> Self {
        Self {
            resolver,
            active: Mutex::new(None),
        }
    }

    pub fn resolver(&self) -> &Arc<ConfigResolver> {
        &self.resolver
    }

    pub async fn is_logging(&self) -> bool {
        self.active.lock().await.is_some()
    }

    /// Names of the running monitors.
    pub async fn monitor_names(&self) -> Vec<String> {
        self.active
            .lock()
            .await
            .iter()
            .flatten()
            .map(|m| m.name().to_string())
            .collect()
    }

    /// Build and start every configured monitor.
    ///
    /// All monitors are resolved before the first one starts, so a
    /// configuration error leaves nothing running. Returns the number of
    /// monitors started.
    pub async fn start_logging(&self, reporter: &dyn StatusReporter) -> Result<usize, CoreError> {
        let mut active = self.active.lock().await;
        if active.is_some() {
            reporter.report(ALREADY_LOGGING).await;
            return Err(CoreError::AlreadyLogging);
        }

        let mut monitors = self.resolver.get_monitors()?;
        for i in 0..monitors.len() {
            if let Err(source) = monitors[i].start() {
                let name = monitors[i].name().to_string();
                error!("Could not start monitor {}: {}", name, source);
                for started in monitors[..i].iter_mut() {
                    if let Err(e) = started.stop().await {
                        error!("Could not stop monitor {}: {}", started.name(), e);
                    }
                }
                return Err(CoreError::Monitor { name, source });
            }
            reporter.report(&started_message(monitors[i].name())).await;
        }

        let count = monitors.len();
        info!("Started {} monitor(s)", count);
        *active = Some(monitors);
        Ok(count)
    }

    /// Stop and join every running monitor, then drop the set.
    pub async fn stop_logging(&self, reporter: &dyn StatusReporter) -> Result<usize, CoreError> {
        let mut active = self.active.lock().await;
        let Some(mut monitors) = active.take() else {
            reporter.report(NOT_LOGGING).await;
            return Err(CoreError::NotLogging);
        };

        for monitor in monitors.iter_mut() {
            if let Err(e) = monitor.stop().await {
                error!("Could not stop monitor {}: {}", monitor.name(), e);
            }
            reporter.report(&stopped_message(monitor.name())).await;
        }
        reporter.report(STOP_DONE).await;

        info!("Stopped {} monitor(s)", monitors.len());
        Ok(monitors.len())
    }
}
