//! Listing commands for clusters, namespaces and workloads

use anyhow::Result;
use dashboard_lib::{ApiResponse, Cluster, DataProvider, Namespace, Workload};
use tabled::Tabled;

use crate::output::{color_status, print_list, OutputFormat};

#[derive(Tabled)]
pub struct ClusterRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
pub struct NamespaceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Resources")]
    resources: u32,
}

#[derive(Tabled)]
pub struct WorkloadRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Status")]
    status: String,
}

pub fn cluster_rows(clusters: &[Cluster]) -> Vec<ClusterRow> {
    clusters
        .iter()
        .map(|c| ClusterRow {
            id: c.id.clone(),
            name: c.name.clone(),
            region: c.region.clone(),
            status: color_status(c.status.as_str()),
        })
        .collect()
}

pub fn namespace_rows(namespaces: &[Namespace]) -> Vec<NamespaceRow> {
    namespaces
        .iter()
        .map(|ns| NamespaceRow {
            id: ns.id.clone(),
            name: ns.name.clone(),
            resources: ns.resource_count,
        })
        .collect()
}

pub fn workload_rows(workloads: &[Workload]) -> Vec<WorkloadRow> {
    workloads
        .iter()
        .map(|wl| WorkloadRow {
            id: wl.id.clone(),
            name: wl.name.clone(),
            kind: wl.kind.to_string(),
            status: color_status(wl.status.as_str()),
        })
        .collect()
}

/// Payload of a successful envelope, or the server's message as an error
pub fn payload<T>(response: ApiResponse<T>) -> Result<T> {
    if response.success {
        Ok(response.data)
    } else {
        anyhow::bail!(
            "{}",
            response
                .message
                .unwrap_or_else(|| "Request was not successful".to_string())
        )
    }
}

pub async fn list_clusters(provider: &dyn DataProvider, format: OutputFormat) -> Result<()> {
    let clusters = payload(provider.get_clusters().await?)?;
    print_list(cluster_rows(&clusters), &clusters, format)
}

pub async fn list_namespaces(
    provider: &dyn DataProvider,
    cluster_id: &str,
    format: OutputFormat,
) -> Result<()> {
    let namespaces = payload(provider.get_namespaces(cluster_id).await?)?;
    print_list(namespace_rows(&namespaces), &namespaces, format)
}

pub async fn list_workloads(
    provider: &dyn DataProvider,
    namespace_id: &str,
    format: OutputFormat,
) -> Result<()> {
    let workloads = payload(provider.get_workloads(namespace_id).await?)?;
    print_list(workload_rows(&workloads), &workloads, format)
}
