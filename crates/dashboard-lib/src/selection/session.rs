//! Async driver binding a [`SelectionState`] to a [`DataProvider`]

use super::state::{FetchTicket, Level, SelectionError, SelectionSnapshot, SelectionState};
use crate::models::ApiResponse;
use crate::observability::{DashboardMetrics, StructuredLogger};
use crate::provider::{DataProvider, ProviderError};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

/// One page view: selection state plus the provider that feeds it
///
/// Cloning is cheap and clones share the same state, so a fetch can be
/// fulfilled on a spawned task while the view keeps rendering snapshots.
#[derive(Clone)]
pub struct DashboardSession {
    provider: Arc<dyn DataProvider>,
    state: Arc<RwLock<SelectionState>>,
    metrics: DashboardMetrics,
    logger: StructuredLogger,
    last_failure: Arc<Mutex<Option<ProviderError>>>,
}

impl DashboardSession {
    pub fn new(label: impl Into<String>, provider: Arc<dyn DataProvider>) -> Self {
        Self {
            provider,
            state: Arc::new(RwLock::new(SelectionState::new())),
            metrics: DashboardMetrics::new(),
            logger: StructuredLogger::new(label),
            last_failure: Arc::new(Mutex::new(None)),
        }
    }

    pub fn label(&self) -> &str {
        self.logger.view()
    }

    /// Most recent transport failure since the last call, if any
    ///
    /// The view treats failures as "no data"; callers that must report an
    /// outage (the terminal client) check this after each step.
    pub fn take_failure(&self) -> Option<ProviderError> {
        self.last_failure.lock().ok().and_then(|mut slot| slot.take())
    }

    pub async fn snapshot(&self) -> SelectionSnapshot {
        self.state.read().await.snapshot()
    }

    pub async fn begin_clusters(&self) -> FetchTicket {
        self.state.write().await.begin_clusters()
    }

    /// Apply a cluster selection and return the namespace fetch to run
    pub async fn begin_cluster(&self, id: Option<&str>) -> Result<Option<FetchTicket>, SelectionError> {
        let ticket = self.state.write().await.select_cluster(id)?;
        self.record_selection("cluster", id);
        Ok(ticket)
    }

    /// Apply a namespace selection and return the workload fetch to run
    pub async fn begin_namespace(&self, id: Option<&str>) -> Result<Option<FetchTicket>, SelectionError> {
        let ticket = self.state.write().await.select_namespace(id)?;
        self.record_selection("namespace", id);
        Ok(ticket)
    }

    /// Apply a workload selection and return the metrics fetch to run
    pub async fn begin_workload(&self, id: Option<&str>) -> Result<Option<FetchTicket>, SelectionError> {
        let ticket = self.state.write().await.select_workload(id)?;
        self.record_selection("workload", id);
        Ok(ticket)
    }

    /// Run the request behind `ticket` and apply its result if still current
    ///
    /// Returns true when the response was applied. Failures and
    /// unsuccessful envelopes are applied as "no data".
    pub async fn fulfil(&self, ticket: FetchTicket) -> bool {
        let key = ticket.key().unwrap_or_default();
        let applied = match ticket.level() {
            Level::Clusters => {
                let data = self.settle(&ticket, self.provider.get_clusters().await);
                self.state.write().await.apply_clusters(&ticket, data)
            }
            Level::Namespaces => {
                let data = self.settle(&ticket, self.provider.get_namespaces(key).await);
                self.state.write().await.apply_namespaces(&ticket, data)
            }
            Level::Workloads => {
                let data = self.settle(&ticket, self.provider.get_workloads(key).await);
                self.state.write().await.apply_workloads(&ticket, data)
            }
            Level::Metrics => {
                let data = self.settle(&ticket, self.provider.get_resource_metrics(key).await);
                self.state.write().await.apply_metrics(&ticket, data)
            }
        };

        if !applied {
            self.metrics.inc_stale_responses(ticket.level().as_str());
            self.logger
                .log_stale_discarded(ticket.level().as_str(), ticket.key(), ticket.generation());
        }
        applied
    }

    pub async fn load_clusters(&self) -> bool {
        let ticket = self.begin_clusters().await;
        self.fulfil(ticket).await
    }

    pub async fn select_cluster(&self, id: Option<&str>) -> Result<bool, SelectionError> {
        let ticket = self.begin_cluster(id).await?;
        Ok(self.fulfil_optional(ticket).await)
    }

    pub async fn select_namespace(&self, id: Option<&str>) -> Result<bool, SelectionError> {
        let ticket = self.begin_namespace(id).await?;
        Ok(self.fulfil_optional(ticket).await)
    }

    pub async fn select_workload(&self, id: Option<&str>) -> Result<bool, SelectionError> {
        let ticket = self.begin_workload(id).await?;
        Ok(self.fulfil_optional(ticket).await)
    }

    async fn fulfil_optional(&self, ticket: Option<FetchTicket>) -> bool {
        match ticket {
            Some(ticket) => self.fulfil(ticket).await,
            None => false,
        }
    }

    fn record_selection(&self, kind: &str, id: Option<&str>) {
        self.metrics.inc_selections(kind);
        self.logger.log_selection(kind, id);
    }

    /// Collapse a provider outcome to the payload to store, logging failures
    fn settle<T>(
        &self,
        ticket: &FetchTicket,
        result: Result<ApiResponse<T>, ProviderError>,
    ) -> Option<T> {
        let level = ticket.level().as_str();
        match result {
            Ok(response) if response.success => Some(response.data),
            Ok(response) => {
                self.logger
                    .log_fetch_unsuccessful(level, ticket.key(), response.message.as_deref());
                None
            }
            Err(e) => {
                self.logger
                    .log_fetch_failed(level, ticket.key(), &e.to_string());
                if let Ok(mut slot) = self.last_failure.lock() {
                    *slot = Some(e);
                }
                None
            }
        }
    }
}
