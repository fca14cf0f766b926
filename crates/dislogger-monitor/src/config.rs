//! Monitor configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::MonitorError;

/// Liveness monitor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessConfig {
    /// Address to probe.
    #[serde(alias = "address")]
    pub ip: String,
}

impl LivenessConfig {
    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.ip.trim().is_empty() {
            return Err(MonitorError::InvalidConfig("ip cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Resource monitor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Utilisation percentage at which a sample is flagged.
    #[serde(default = "default_warn_threshold")]
    pub warn_threshold: f32,

    /// Seconds between two samples.
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
}

fn default_warn_threshold() -> f32 {
    90.0
}

fn default_interval() -> u64 {
    3
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            warn_threshold: default_warn_threshold(),
            interval_secs: default_interval(),
        }
    }
}

impl ResourceConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn validate(&self) -> Result<(), MonitorError> {
        if !(0.0..=100.0).contains(&self.warn_threshold) {
            return Err(MonitorError::InvalidConfig(format!(
                "warn_threshold must be within 0..=100, got {}",
                self.warn_threshold
            )));
        }
        if self.interval_secs == 0 {
            return Err(MonitorError::InvalidConfig(
                "interval_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_defaults() {
        let config: ResourceConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.warn_threshold, 90.0);
        assert_eq!(config.interval(), Duration::from_secs(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resource_validation() {
        let too_high = ResourceConfig {
            warn_threshold: 120.0,
            ..Default::default()
        };
        assert!(too_high.validate().is_err());

        let no_interval = ResourceConfig {
            interval_secs: 0,
            ..Default::default()
        };
        assert!(no_interval.validate().is_err());
    }

    #[test]
    fn test_liveness_address_alias() {
        let config: LivenessConfig = serde_json::from_str(r#"{"address": "10.0.0.5"}"#).unwrap();
        assert_eq!(config.ip, "10.0.0.5");
        assert!(config.validate().is_ok());

        let blank = LivenessConfig { ip: " ".to_string() };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_liveness_requires_ip() {
        assert!(serde_json::from_str::<LivenessConfig>("{}").is_err());
    }
}
