//! Provider decorator recording latency, failures and component health

use super::{operations, DataProvider, ProviderError};
use crate::health::{components, HealthRegistry};
use crate::models::{ApiResponse, Cluster, Namespace, ResourceMetrics, Workload};
use crate::observability::DashboardMetrics;
use async_trait::async_trait;
use std::future::Future;
use std::time::Instant;

/// Wraps any provider with Prometheus metrics and health reporting
pub struct InstrumentedProvider<P> {
    inner: P,
    metrics: DashboardMetrics,
    health: HealthRegistry,
}

impl<P: DataProvider> InstrumentedProvider<P> {
    pub fn new(inner: P, metrics: DashboardMetrics, health: HealthRegistry) -> Self {
        Self {
            inner,
            metrics,
            health,
        }
    }

    async fn observe<T, F>(&self, operation: &str, call: F) -> Result<ApiResponse<T>, ProviderError>
    where
        F: Future<Output = Result<ApiResponse<T>, ProviderError>>,
    {
        let started = Instant::now();
        let result = call.await;
        self.metrics
            .observe_provider_latency(operation, started.elapsed().as_secs_f64());

        match &result {
            Ok(response) => {
                if !response.success {
                    self.metrics.inc_unsuccessful_responses(operation);
                }
                self.health.set_healthy(components::PROVIDER).await;
            }
            Err(e) => {
                self.metrics.inc_provider_failures(operation);
                self.health
                    .set_degraded(components::PROVIDER, format!("{operation}: {e}"))
                    .await;
            }
        }

        result
    }
}

#[async_trait]
impl<P: DataProvider> DataProvider for InstrumentedProvider<P> {
    async fn get_clusters(&self) -> Result<ApiResponse<Vec<Cluster>>, ProviderError> {
        self.observe(operations::GET_CLUSTERS, self.inner.get_clusters())
            .await
    }

    async fn get_namespaces(
        &self,
        cluster_id: &str,
    ) -> Result<ApiResponse<Vec<Namespace>>, ProviderError> {
        self.observe(
            operations::GET_NAMESPACES,
            self.inner.get_namespaces(cluster_id),
        )
        .await
    }

    async fn get_workloads(
        &self,
        namespace_id: &str,
    ) -> Result<ApiResponse<Vec<Workload>>, ProviderError> {
        self.observe(
            operations::GET_WORKLOADS,
            self.inner.get_workloads(namespace_id),
        )
        .await
    }

    async fn get_resource_metrics(
        &self,
        workload_id: &str,
    ) -> Result<ApiResponse<ResourceMetrics>, ProviderError> {
        self.observe(
            operations::GET_RESOURCE_METRICS,
            self.inner.get_resource_metrics(workload_id),
        )
        .await
    }
}
