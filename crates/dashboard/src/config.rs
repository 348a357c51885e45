//! Dashboard configuration

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Dashboard configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// HTTP port for the dashboard, provider API and health/metrics
    #[serde(default = "default_port")]
    pub port: u16,

    /// Apply the mock provider's simulated network delays
    #[serde(default = "default_simulate_latency")]
    pub simulate_latency: bool,

    /// Idle time after which a page view is discarded
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,

    /// How often idle page views are swept
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    /// Live page views above which the `sessions` component reports degraded
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_port() -> u16 {
    8080
}

fn default_simulate_latency() -> bool {
    true
}

fn default_session_ttl() -> u64 {
    30 * 60
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_max_sessions() -> usize {
    10_000
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            simulate_latency: default_simulate_latency(),
            session_ttl_secs: default_session_ttl(),
            sweep_interval_secs: default_sweep_interval(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("DASHBOARD").try_parsing(true)
}

impl DashboardConfig {
    /// Load configuration from `DASHBOARD_*` environment variables
    pub fn load() -> Result<Self> {
        Self::from_source(environment())
    }

    pub fn from_source<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        config::Config::builder()
            .add_source(source)
            .build()
            .context("Failed to read dashboard configuration")?
            .try_deserialize()
            .context("Invalid dashboard configuration")
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}
