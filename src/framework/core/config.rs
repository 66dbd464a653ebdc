use super::error::ConfigError;
use std::time::Duration;

/// Settings for the log view and the watcher
#[derive(Debug, Clone)]
pub struct InspectorConfig {
    /// Search text applied to request URLs
    pub search: String,
    /// How often relative timestamps are re-rendered while watching
    pub refresh_interval: Duration,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            search: String::new(),
            refresh_interval: Duration::from_secs(1),
        }
    }
}

impl InspectorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval.is_zero() {
            return Err(ConfigError::ValidationError(
                "refresh interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for the simulated capture source
#[derive(Debug, Clone)]
pub struct FakeCaptureConfig {
    pub exchange_count: usize,
    pub delay_ms: u64,
    /// Every n-th exchange fails instead of completing; 0 disables failures
    pub failure_every: usize,
}

impl Default for FakeCaptureConfig {
    fn default() -> Self {
        Self {
            exchange_count: 5,
            delay_ms: 100,
            failure_every: 4,
        }
    }
}

impl FakeCaptureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.exchange_count == 0 {
            return Err(ConfigError::ValidationError(
                "exchange count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
