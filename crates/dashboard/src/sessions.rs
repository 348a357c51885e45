//! Page-view sessions
//!
//! Each load of the dashboard root gets its own selection state. Views that
//! stay idle longer than the TTL are dropped by a background sweeper.

use dashboard_lib::{
    health::{components, ComponentHealth, HealthRegistry},
    DashboardMetrics, DashboardSession, DataProvider, StructuredLogger,
};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

struct SessionEntry {
    session: DashboardSession,
    last_seen: Instant,
}

/// Concurrent map of live page views
pub struct SessionStore {
    sessions: DashMap<String, SessionEntry>,
    provider: Arc<dyn DataProvider>,
    ttl: Duration,
    max_sessions: usize,
    metrics: DashboardMetrics,
}

impl SessionStore {
    pub fn new(provider: Arc<dyn DataProvider>, ttl: Duration, metrics: DashboardMetrics) -> Self {
        Self {
            sessions: DashMap::new(),
            provider,
            ttl,
            max_sessions: usize::MAX,
            metrics,
        }
    }

    /// Report degraded health once more than `max_sessions` views are live
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions;
        self
    }

    /// Start a fresh page view
    pub fn create(&self) -> DashboardSession {
        let id = Uuid::new_v4().simple().to_string();
        let session = DashboardSession::new(id.clone(), self.provider.clone());
        self.sessions.insert(
            id,
            SessionEntry {
                session: session.clone(),
                last_seen: Instant::now(),
            },
        );
        self.metrics.set_active_sessions(self.sessions.len() as i64);
        session
    }

    /// Look up a page view and mark it as recently used
    pub fn get(&self, id: &str) -> Option<DashboardSession> {
        let mut entry = self.sessions.get_mut(id)?;
        entry.last_seen = Instant::now();
        Some(entry.session.clone())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop page views idle for at least the TTL; returns how many were removed
    pub fn sweep(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|id, entry| {
            let idle = entry.last_seen.elapsed();
            let keep = idle < self.ttl;
            if !keep {
                StructuredLogger::new(id.as_str()).log_session_expired(idle.as_secs());
            }
            keep
        });
        let removed = before.saturating_sub(self.sessions.len());
        self.metrics.set_active_sessions(self.sessions.len() as i64);
        removed
    }

    pub fn health(&self) -> ComponentHealth {
        let live = self.len();
        if live > self.max_sessions {
            ComponentHealth::degraded(format!(
                "{live} live page views exceed the limit of {}",
                self.max_sessions
            ))
        } else {
            ComponentHealth::healthy()
        }
    }

    /// Periodically sweep idle page views until the task is aborted
    pub fn spawn_sweeper(self: Arc<Self>, every: Duration, health: HealthRegistry) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let removed = self.sweep();
                if removed > 0 {
                    debug!(removed = removed, live = self.len(), "Swept idle page views");
                }
                health.update(components::SESSIONS, self.health()).await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_lib::{ComponentStatus, MockProvider};

    fn store(ttl: Duration) -> SessionStore {
        SessionStore::new(Arc::new(MockProvider::instant()), ttl, DashboardMetrics::new())
    }

    #[tokio::test]
    async fn test_created_sessions_are_independent() {
        let store = store(Duration::from_secs(60));
        let first = store.create();
        let second = store.create();

        assert_ne!(first.label(), second.label());
        assert_eq!(store.len(), 2);

        first.load_clusters().await;
        first.select_cluster(Some("cluster-1")).await.unwrap();

        let other = store.get(second.label()).unwrap().snapshot().await;
        assert!(other.clusters.is_empty());
        assert!(other.selected_cluster.is_none());

        let same = store.get(first.label()).unwrap().snapshot().await;
        assert_eq!(same.selected_cluster.as_deref(), Some("cluster-1"));
    }

    #[test]
    fn test_unknown_session_is_absent() {
        let store = store(Duration::from_secs(60));
        assert!(store.get("missing").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_sweep_keeps_fresh_sessions() {
        let store = store(Duration::from_secs(60));
        store.create();

        assert_eq!(store.sweep(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_health_degrades_above_session_limit() {
        let store = store(Duration::from_secs(60)).with_max_sessions(1);
        store.create();
        assert_eq!(store.health().status, ComponentStatus::Healthy);

        store.create();
        let health = store.health();
        assert_eq!(health.status, ComponentStatus::Degraded);
        assert_eq!(
            health.message.as_deref(),
            Some("2 live page views exceed the limit of 1")
        );
    }

    #[tokio::test]
    async fn test_sweeper_reports_session_health() {
        let registry = HealthRegistry::new();
        registry.register(components::SESSIONS).await;
        let store = Arc::new(store(Duration::from_secs(60)).with_max_sessions(0));
        store.create();

        let sweeper = store.clone().spawn_sweeper(Duration::from_millis(5), registry.clone());
        tokio::time::sleep(Duration::from_millis(50)).await;
        sweeper.abort();

        let health = registry.health().await;
        assert_eq!(
            health.components[components::SESSIONS].status,
            ComponentStatus::Degraded
        );
    }

    #[test]
    fn test_sweep_drops_idle_sessions() {
        let store = store(Duration::ZERO);
        let session = store.create();

        assert_eq!(store.sweep(), 1);
        assert!(store.get(session.label()).is_none());
    }
}
