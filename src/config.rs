//! Configuration types.
//!
//! Every timing constant of the autopilot (cycle interval, seed stagger,
//! summary cadence) lives here rather than inline at the call sites, so
//! deployments and tests can tune them independently.

use std::time::Duration;

use crate::error::ConfigError;

/// Autopilot configuration.
#[derive(Debug, Clone)]
pub struct PilotConfig {
    /// Sleep between dispatch cycles.
    pub cycle_interval: Duration,
    /// Offset between consecutive seed tasks' due times, so the initial
    /// batch does not fire all at once.
    pub stagger: Duration,
    /// How often the loop considers publishing a progress-summary insight.
    pub summary_interval: Duration,
    /// Trailing window of task completions a summary insight reports on.
    pub summary_window: Duration,
    /// Maximum retained insights (oldest evicted beyond this).
    pub max_insights: usize,
    /// Simulated base latency for the built-in workers (zero disables).
    pub worker_latency: Duration,
    /// Port for the status/control HTTP surface.
    pub http_port: u16,
}

impl Default for PilotConfig {
    fn default() -> Self {
        Self {
            cycle_interval: Duration::from_secs(30),
            stagger: Duration::from_secs(5),
            summary_interval: Duration::from_secs(120), // 2 minutes
            summary_window: Duration::from_secs(300),   // 5 minutes
            max_insights: 50,
            worker_latency: Duration::from_millis(1500),
            http_port: 8090,
        }
    }
}

impl PilotConfig {
    /// Build a config from `CAREER_PILOT_*` environment overrides on top
    /// of the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(v) = lookup("CAREER_PILOT_CYCLE_SECS") {
            config.cycle_interval = Duration::from_secs(parse_u64("CAREER_PILOT_CYCLE_SECS", &v)?);
        }
        if let Some(v) = lookup("CAREER_PILOT_STAGGER_SECS") {
            config.stagger = Duration::from_secs(parse_u64("CAREER_PILOT_STAGGER_SECS", &v)?);
        }
        if let Some(v) = lookup("CAREER_PILOT_SUMMARY_SECS") {
            config.summary_interval =
                Duration::from_secs(parse_u64("CAREER_PILOT_SUMMARY_SECS", &v)?);
        }
        if let Some(v) = lookup("CAREER_PILOT_SUMMARY_WINDOW_SECS") {
            config.summary_window =
                Duration::from_secs(parse_u64("CAREER_PILOT_SUMMARY_WINDOW_SECS", &v)?);
        }
        if let Some(v) = lookup("CAREER_PILOT_MAX_INSIGHTS") {
            config.max_insights = parse_u64("CAREER_PILOT_MAX_INSIGHTS", &v)? as usize;
        }
        if let Some(v) = lookup("CAREER_PILOT_WORKER_LATENCY_MS") {
            config.worker_latency =
                Duration::from_millis(parse_u64("CAREER_PILOT_WORKER_LATENCY_MS", &v)?);
        }
        if let Some(v) = lookup("CAREER_PILOT_HTTP_PORT") {
            config.http_port =
                parse_u64("CAREER_PILOT_HTTP_PORT", &v)?
                    .try_into()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: "CAREER_PILOT_HTTP_PORT".to_string(),
                        message: format!("port out of range: {v}"),
                    })?;
        }

        Ok(config)
    }
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("expected an integer, got '{value}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PilotConfig::default();
        assert_eq!(config.cycle_interval.as_secs(), 30);
        assert_eq!(config.stagger.as_secs(), 5);
        assert_eq!(config.summary_window.as_secs(), 300);
        assert_eq!(config.max_insights, 50);
    }

    #[test]
    fn lookup_overrides() {
        let config = PilotConfig::from_lookup(|key| match key {
            "CAREER_PILOT_CYCLE_SECS" => Some("10".to_string()),
            "CAREER_PILOT_MAX_INSIGHTS" => Some("25".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.cycle_interval.as_secs(), 10);
        assert_eq!(config.max_insights, 25);
        // Untouched keys keep their defaults.
        assert_eq!(config.stagger.as_secs(), 5);
    }

    #[test]
    fn invalid_value_rejected() {
        let result = PilotConfig::from_lookup(|key| match key {
            "CAREER_PILOT_CYCLE_SECS" => Some("soon".to_string()),
            _ => None,
        });
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key, .. }) if key == "CAREER_PILOT_CYCLE_SECS"
        ));
    }

    #[test]
    fn port_out_of_range_rejected() {
        let result = PilotConfig::from_lookup(|key| match key {
            "CAREER_PILOT_HTTP_PORT" => Some("90000".to_string()),
            _ => None,
        });
        assert!(result.is_err());
    }
}
