//! Resource Dashboard - cluster resource recommendation viewer
//!
//! Serves a browser dashboard for picking a cluster, namespace and workload
//! and comparing its current allocation with the recommended one.

use anyhow::Result;
use dashboard_lib::{
    health::{components, HealthRegistry},
    DashboardMetrics, DataProvider, InstrumentedProvider, LatencyProfile, MockProvider,
    StructuredLogger,
};
use resource_dashboard::{api, config::DashboardConfig, sessions::SessionStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DASHBOARD_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting resource-dashboard");

    let config = DashboardConfig::load()?;
    info!(
        port = config.port,
        simulate_latency = config.simulate_latency,
        session_ttl_secs = config.session_ttl_secs,
        "Dashboard configured"
    );

    let health_registry = HealthRegistry::new();
    health_registry.register(components::PROVIDER).await;
    health_registry.register(components::SESSIONS).await;

    let metrics = DashboardMetrics::new();

    let logger = StructuredLogger::new("server");
    logger.log_startup(DASHBOARD_VERSION, config.port, config.simulate_latency);

    let latency = if config.simulate_latency {
        LatencyProfile::default()
    } else {
        LatencyProfile::none()
    };
    let provider: Arc<dyn DataProvider> = Arc::new(InstrumentedProvider::new(
        MockProvider::with_latency(latency),
        metrics.clone(),
        health_registry.clone(),
    ));

    let sessions = Arc::new(SessionStore::new(
        provider.clone(),
        config.session_ttl(),
        metrics.clone(),
    )
    .with_max_sessions(config.max_sessions));
    let sweeper = sessions
        .clone()
        .spawn_sweeper(config.sweep_interval(), health_registry.clone());

    let app_state = Arc::new(api::AppState::new(
        health_registry.clone(),
        metrics,
        provider,
        sessions,
    ));

    health_registry.set_ready(true).await;

    let server = tokio::spawn(api::serve(config.port, app_state));

    tokio::select! {
        result = server => {
            sweeper.abort();
            result??;
        }
        _ = tokio::signal::ctrl_c() => {
            logger.log_shutdown("SIGINT received");
            sweeper.abort();
            info!("Shutting down");
        }
    }

    Ok(())
}
