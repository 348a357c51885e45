//! Observability infrastructure for the dashboard
//!
//! Provides:
//! - Prometheus metrics (provider latency and failures, stale responses, sessions)
//! - Structured JSON logging with tracing

use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge, HistogramVec,
    IntCounterVec, IntGauge,
};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Histogram buckets for provider calls (in seconds); mock calls sleep up to 0.8s
const PROVIDER_LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.4, 0.5, 0.6, 0.8, 1.0, 2.5, 5.0,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<DashboardMetricsInner> = OnceLock::new();

struct DashboardMetricsInner {
    provider_latency_seconds: HistogramVec,
    provider_failures: IntCounterVec,
    provider_empty_responses: IntCounterVec,
    stale_responses: IntCounterVec,
    selections: IntCounterVec,
    active_sessions: IntGauge,
}

impl DashboardMetricsInner {
    fn new() -> Self {
        Self {
            provider_latency_seconds: register_histogram_vec!(
                "dashboard_provider_latency_seconds",
                "Time spent in data provider lookups",
                &["operation"],
                PROVIDER_LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register provider_latency_seconds"),

            provider_failures: register_int_counter_vec!(
                "dashboard_provider_failures_total",
                "Provider lookups that failed before returning an envelope",
                &["operation"]
            )
            .expect("Failed to register provider_failures"),

            provider_empty_responses: register_int_counter_vec!(
                "dashboard_provider_unsuccessful_responses_total",
                "Provider envelopes returned with success=false",
                &["operation"]
            )
            .expect("Failed to register provider_unsuccessful_responses"),

            stale_responses: register_int_counter_vec!(
                "dashboard_stale_responses_total",
                "Responses discarded because the selection changed while in flight",
                &["level"]
            )
            .expect("Failed to register stale_responses"),

            selections: register_int_counter_vec!(
                "dashboard_selections_total",
                "Selection changes applied per level",
                &["level"]
            )
            .expect("Failed to register selections"),

            active_sessions: register_int_gauge!(
                "dashboard_active_sessions",
                "Number of live dashboard page views"
            )
            .expect("Failed to register active_sessions"),
        }
    }
}

/// Dashboard metrics for Prometheus exposition
///
/// Lightweight handle to the global metrics instance; clones share the same
/// underlying metrics.
#[derive(Clone)]
pub struct DashboardMetrics {
    _private: (),
}

impl Default for DashboardMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardMetrics {
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(DashboardMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &DashboardMetricsInner {
        GLOBAL_METRICS.get_or_init(DashboardMetricsInner::new)
    }

    pub fn observe_provider_latency(&self, operation: &str, duration_secs: f64) {
        self.inner()
            .provider_latency_seconds
            .with_label_values(&[operation])
            .observe(duration_secs);
    }

    pub fn inc_provider_failures(&self, operation: &str) {
        self.inner()
            .provider_failures
            .with_label_values(&[operation])
            .inc();
    }

    pub fn inc_unsuccessful_responses(&self, operation: &str) {
        self.inner()
            .provider_empty_responses
            .with_label_values(&[operation])
            .inc();
    }

    pub fn inc_stale_responses(&self, level: &str) {
        self.inner().stale_responses.with_label_values(&[level]).inc();
    }

    pub fn inc_selections(&self, level: &str) {
        self.inner().selections.with_label_values(&[level]).inc();
    }

    pub fn set_active_sessions(&self, count: i64) {
        self.inner().active_sessions.set(count);
    }

    pub fn stale_responses(&self, level: &str) -> u64 {
        self.inner().stale_responses.with_label_values(&[level]).get()
    }
}

/// Structured logger for dashboard events
///
/// Every record carries an `event` field and the page view it belongs to.
#[derive(Clone, Debug)]
pub struct StructuredLogger {
    view: String,
}

impl StructuredLogger {
    pub fn new(view: impl Into<String>) -> Self {
        Self { view: view.into() }
    }

    pub fn view(&self) -> &str {
        &self.view
    }

    /// Log service startup
    pub fn log_startup(&self, version: &str, port: u16, simulate_latency: bool) {
        info!(
            event = "dashboard_started",
            view = %self.view,
            version = %version,
            port = port,
            simulate_latency = simulate_latency,
            "Cluster resource dashboard started"
        );
    }

    /// Log service shutdown
    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "dashboard_shutdown",
            view = %self.view,
            reason = %reason,
            "Cluster resource dashboard shutting down"
        );
    }

    pub fn log_selection(&self, level: &str, id: Option<&str>) {
        debug!(
            event = "selection_changed",
            view = %self.view,
            level = %level,
            id = ?id,
            "Selection changed"
        );
    }

    /// Log a lookup that failed outright; the level degrades to no data
    pub fn log_fetch_failed(&self, level: &str, key: Option<&str>, error: &str) {
        warn!(
            event = "fetch_failed",
            view = %self.view,
            level = %level,
            key = ?key,
            error = %error,
            "Failed to fetch data, showing empty state"
        );
    }

    /// Log an envelope that came back with success=false
    pub fn log_fetch_unsuccessful(&self, level: &str, key: Option<&str>, message: Option<&str>) {
        info!(
            event = "fetch_unsuccessful",
            view = %self.view,
            level = %level,
            key = ?key,
            message = ?message,
            "Provider returned no data"
        );
    }

    pub fn log_stale_discarded(&self, level: &str, key: Option<&str>, generation: u64) {
        debug!(
            event = "stale_response_discarded",
            view = %self.view,
            level = %level,
            key = ?key,
            generation = generation,
            "Discarded response for a selection that is no longer active"
        );
    }

    pub fn log_session_expired(&self, idle_secs: u64) {
        info!(
            event = "session_expired",
            view = %self.view,
            idle_secs = idle_secs,
            "Page view expired"
        );
    }
}
