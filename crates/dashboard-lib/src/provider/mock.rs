//! Static in-memory provider with simulated network latency

use super::{DataProvider, ProviderError};
use crate::models::{
    ApiResponse, Cluster, ClusterStatus, Measurement, Namespace, ResourceMetrics, Workload,
    WorkloadKind, WorkloadStatus, COST_UNIT, CPU_UNIT, MEMORY_UNIT, REPLICAS_UNIT,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Simulated delay per lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub clusters: Duration,
    pub namespaces: Duration,
    pub workloads: Duration,
    pub metrics: Duration,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            clusters: Duration::from_millis(800),
            namespaces: Duration::from_millis(600),
            workloads: Duration::from_millis(500),
            metrics: Duration::from_millis(400),
        }
    }
}

impl LatencyProfile {
    /// No simulated delay at all
    pub fn none() -> Self {
        Self {
            clusters: Duration::ZERO,
            namespaces: Duration::ZERO,
            workloads: Duration::ZERO,
            metrics: Duration::ZERO,
        }
    }
}

async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Provider answering from fixed lookup tables
pub struct MockProvider {
    latency: LatencyProfile,
    clusters: Vec<Cluster>,
    namespaces: Vec<Namespace>,
    workloads: Vec<Workload>,
    metrics: HashMap<String, ResourceMetrics>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Mock tables with the default simulated latency
    pub fn new() -> Self {
        Self::with_latency(LatencyProfile::default())
    }

    /// Mock tables answering immediately
    pub fn instant() -> Self {
        Self::with_latency(LatencyProfile::none())
    }

    pub fn with_latency(latency: LatencyProfile) -> Self {
        Self {
            latency,
            clusters: seed_clusters(),
            namespaces: seed_namespaces(),
            workloads: seed_workloads(),
            metrics: seed_metrics(),
        }
    }

    pub fn latency(&self) -> LatencyProfile {
        self.latency
    }
}

#[async_trait]
impl DataProvider for MockProvider {
    async fn get_clusters(&self) -> Result<ApiResponse<Vec<Cluster>>, ProviderError> {
        simulate(self.latency.clusters).await;
        Ok(ApiResponse::ok(
            self.clusters.clone(),
            "Clusters fetched successfully",
        ))
    }

    async fn get_namespaces(
        &self,
        cluster_id: &str,
    ) -> Result<ApiResponse<Vec<Namespace>>, ProviderError> {
        simulate(self.latency.namespaces).await;
        let namespaces = self
            .namespaces
            .iter()
            .filter(|ns| ns.cluster_id == cluster_id)
            .cloned()
            .collect();
        Ok(ApiResponse::ok(namespaces, "Namespaces fetched successfully"))
    }

    async fn get_workloads(
        &self,
        namespace_id: &str,
    ) -> Result<ApiResponse<Vec<Workload>>, ProviderError> {
        simulate(self.latency.workloads).await;
        let workloads = self
            .workloads
            .iter()
            .filter(|wl| wl.namespace_id == namespace_id)
            .cloned()
            .collect();
        Ok(ApiResponse::ok(workloads, "Workloads fetched successfully"))
    }

    async fn get_resource_metrics(
        &self,
        workload_id: &str,
    ) -> Result<ApiResponse<ResourceMetrics>, ProviderError> {
        simulate(self.latency.metrics).await;
        Ok(match self.metrics.get(workload_id) {
            Some(metrics) => ApiResponse::ok(
                metrics.clone(),
                "Resource metrics fetched successfully",
            ),
            None => ApiResponse::failure(ResourceMetrics::default(), "Resource metrics not found"),
        })
    }
}

fn cluster(id: &str, name: &str, region: &str) -> Cluster {
    Cluster {
        id: id.to_string(),
        name: name.to_string(),
        region: region.to_string(),
        status: ClusterStatus::Active,
    }
}

fn namespace(id: &str, name: &str, cluster_id: &str, resource_count: u32) -> Namespace {
    Namespace {
        id: id.to_string(),
        name: name.to_string(),
        cluster_id: cluster_id.to_string(),
        resource_count,
    }
}

fn workload(id: &str, name: &str, kind: WorkloadKind, namespace_id: &str) -> Workload {
    Workload {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        namespace_id: namespace_id.to_string(),
        status: WorkloadStatus::Running,
    }
}

/// Rows are (cpu, memory, replicas, cost), each as (current, recommended)
fn metrics(
    cpu: (f64, f64),
    memory: (f64, f64),
    replicas: (f64, f64),
    cost: (f64, f64),
) -> ResourceMetrics {
    ResourceMetrics {
        cpu: Measurement::new(cpu.0, cpu.1, CPU_UNIT),
        memory: Measurement::new(memory.0, memory.1, MEMORY_UNIT),
        replicas: Measurement::new(replicas.0, replicas.1, REPLICAS_UNIT),
        cost_per_month: Measurement::new(cost.0, cost.1, COST_UNIT),
    }
}

fn seed_clusters() -> Vec<Cluster> {
    vec![
        cluster("cluster-1", "Production EKS", "us-east-1"),
        cluster("cluster-2", "Staging EKS", "us-west-2"),
        cluster("cluster-3", "Development EKS", "eu-west-1"),
    ]
}

fn seed_namespaces() -> Vec<Namespace> {
    vec![
        namespace("ns-1", "default", "cluster-1", 12),
        namespace("ns-2", "kube-system", "cluster-1", 8),
        namespace("ns-3", "monitoring", "cluster-1", 5),
        namespace("ns-4", "ingress-nginx", "cluster-1", 3),
        namespace("ns-5", "default", "cluster-2", 6),
        namespace("ns-6", "staging", "cluster-2", 4),
    ]
}

fn seed_workloads() -> Vec<Workload> {
    vec![
        workload("wl-1", "web-frontend", WorkloadKind::Deployment, "ns-1"),
        workload("wl-2", "api-backend", WorkloadKind::Deployment, "ns-1"),
        workload("wl-3", "redis-cache", WorkloadKind::Statefulset, "ns-1"),
        workload("wl-4", "log-collector", WorkloadKind::Daemonset, "ns-1"),
        workload("wl-5", "prometheus", WorkloadKind::Deployment, "ns-3"),
        workload("wl-6", "grafana", WorkloadKind::Deployment, "ns-3"),
    ]
}

fn seed_metrics() -> HashMap<String, ResourceMetrics> {
    HashMap::from([
        (
            "wl-1".to_string(),
            metrics((2.5, 1.8), (4.0, 2.8), (5.0, 3.0), (245.60, 172.80)),
        ),
        (
            "wl-2".to_string(),
            metrics((1.2, 1.6), (2.0, 3.2), (3.0, 4.0), (156.40, 198.20)),
        ),
        (
            "wl-3".to_string(),
            metrics((0.8, 0.6), (1.5, 1.2), (2.0, 2.0), (89.30, 71.20)),
        ),
    ])
}
