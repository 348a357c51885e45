//! Data provider contract
//!
//! Every lookup returns the same envelope shape. The mock provider answers
//! from static tables after a simulated delay; an HTTP-backed provider can be
//! swapped in without changing the contract.

mod instrumented;
mod mock;

pub use instrumented::InstrumentedProvider;
pub use mock::{LatencyProfile, MockProvider};

use crate::models::{ApiResponse, Cluster, Namespace, ResourceMetrics, Workload};
use async_trait::async_trait;
use thiserror::Error;

/// Operation names used in logs and metric labels
pub mod operations {
    pub const GET_CLUSTERS: &str = "get_clusters";
    pub const GET_NAMESPACES: &str = "get_namespaces";
    pub const GET_WORKLOADS: &str = "get_workloads";
    pub const GET_RESOURCE_METRICS: &str = "get_resource_metrics";
}

/// Failure to obtain an envelope at all
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected response status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Lookup operations backing the dashboard
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn get_clusters(&self) -> Result<ApiResponse<Vec<Cluster>>, ProviderError>;

    /// Namespaces owned by `cluster_id`; unknown ids yield an empty list
    async fn get_namespaces(
        &self,
        cluster_id: &str,
    ) -> Result<ApiResponse<Vec<Namespace>>, ProviderError>;

    /// Workloads owned by `namespace_id`; unknown ids yield an empty list
    async fn get_workloads(
        &self,
        namespace_id: &str,
    ) -> Result<ApiResponse<Vec<Workload>>, ProviderError>;

    /// Metrics for `workload_id`; unknown ids yield `success: false`
    async fn get_resource_metrics(
        &self,
        workload_id: &str,
    ) -> Result<ApiResponse<ResourceMetrics>, ProviderError>;
}
