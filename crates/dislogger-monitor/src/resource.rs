//! CPU and memory utilisation monitoring.

use std::time::Duration;

use async_trait::async_trait;
use sysinfo::{CpuExt, System, SystemExt};
use tracing::warn;

use dislogger_logging::{Level, Logger};

use crate::config::ResourceConfig;
use crate::error::MonitorError;
use crate::monitor::MonitorLoop;

/// Marker appended to a sample at or above the warning threshold.
pub const BREACH_FLAG: &str = "\u{26a0}\u{fe0f}";

/// What a [`ResourceMonitor`] samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// One percentage per logical core.
    Cpu,
    /// A single percentage of physical memory in use.
    Memory,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Cpu => "cpu",
            ResourceKind::Memory => "memory",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Source of utilisation percentages.
pub trait ResourceSampler: Send {
    fn sample(&mut self) -> Result<Vec<f32>, MonitorError>;
}

/// Samples the local host through `sysinfo`.
pub struct SystemSampler {
    kind: ResourceKind,
    system: System,
}

impl SystemSampler {
    pub fn new(kind: ResourceKind) -> Self {
        let mut system = System::new();
        // CPU usage is computed between two refreshes.
        if kind == ResourceKind::Cpu {
            system.refresh_cpu();
        }
        Self { kind, system }
    }
}

impl ResourceSampler for SystemSampler {
    fn sample(&mut self) -> Result<Vec<f32>, MonitorError> {
        match self.kind {
            ResourceKind::Cpu => {
                self.system.refresh_cpu();
                let usage: Vec<f32> = self.system.cpus().iter().map(|c| c.cpu_usage()).collect();
                if usage.is_empty() {
                    return Err(MonitorError::Sampling("cpu: no cores reported".to_string()));
                }
                Ok(usage)
            }
            ResourceKind::Memory => {
                self.system.refresh_memory();
                let total = self.system.total_memory();
                if total == 0 {
                    return Err(MonitorError::Sampling(
                        "memory: total memory reported as 0".to_string(),
                    ));
                }
                let used = self.system.used_memory();
                Ok(vec![(used as f64 / total as f64 * 100.0) as f32])
            }
        }
    }
}

/// Periodically samples CPU or memory utilisation and reports it.
pub struct ResourceMonitor {
    kind: ResourceKind,
    sampler: Box<dyn ResourceSampler>,
    warn_threshold: f32,
    interval: Duration,
}

impl ResourceMonitor {
    pub fn new(
        kind: ResourceKind,
        sampler: Box<dyn ResourceSampler>,
        warn_threshold: f32,
        interval: Duration,
    ) -> Self {
        Self {
            kind,
            sampler,
            warn_threshold,
            interval,
        }
    }

    /// Build a monitor that samples the local host.
    pub fn from_config(kind: ResourceKind, config: &ResourceConfig) -> Result<Self, MonitorError> {
        config.validate()?;
        Ok(Self::new(
            kind,
            Box::new(SystemSampler::new(kind)),
            config.warn_threshold,
            config.interval(),
        ))
    }

    pub fn resource(&self) -> ResourceKind {
        self.kind
    }

    pub fn warn_threshold(&self) -> f32 {
        self.warn_threshold
    }

    /// Turn one sample into the level and message to log.
    pub fn render(kind: ResourceKind, values: &[f32], warn_threshold: f32) -> (Level, String) {
        let flag = |value: f32| {
            if value >= warn_threshold {
                format!(" {}", BREACH_FLAG)
            } else {
                String::new()
            }
        };

        let message = match kind {
            ResourceKind::Cpu => {
                let mut lines = vec!["CPU usage:".to_string()];
                for (i, value) in values.iter().enumerate() {
                    lines.push(format!("Core {}: {:.1}%{}", i, value, flag(*value)));
                }
                lines.join("\n")
            }
            ResourceKind::Memory => {
                let value = values.first().copied().unwrap_or_default();
                format!("Memory usage: {:.1}%{}", value, flag(value))
            }
        };

        let level = if values.iter().any(|v| *v >= warn_threshold) {
            Level::Warning
        } else {
            Level::Info
        };
        (level, message)
    }
}

#[async_trait]
impl MonitorLoop for ResourceMonitor {
    fn kind(&self) -> &'static str {
        self.kind.as_str()
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn iterate(&mut self, logger: &Logger) {
        let values = match self.sampler.sample() {
            Ok(values) => values,
            Err(e) => {
                warn!("Skipping {} sample: {}", self.kind, e);
                return;
            }
        };
        let (level, message) = Self::render(self.kind, &values, self.warn_threshold);
        logger.log(level, message);
    }
}
