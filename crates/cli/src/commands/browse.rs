//! Walk the cluster → namespace → workload cascade from the terminal

use anyhow::Result;
use colored::Colorize;
use dashboard_lib::{DashboardSession, DataProvider, SelectionSnapshot};
use std::sync::Arc;

use super::compare::print_metrics;
use super::list::{cluster_rows, namespace_rows, workload_rows};
use crate::output::{print_info, print_json, print_list, OutputFormat};

/// Requested path through the cascade; later levels need earlier ones
#[derive(Debug, Default)]
pub struct BrowsePath {
    pub cluster: Option<String>,
    pub namespace: Option<String>,
    pub workload: Option<String>,
}

/// Fail the walk if the previous step could not reach the dashboard
fn ensure_reachable(session: &DashboardSession) -> Result<()> {
    match session.take_failure() {
        Some(e) => Err(anyhow::Error::new(e).context("Dashboard is unreachable")),
        None => Ok(()),
    }
}

/// Run the selection cascade and return where it ended up
pub async fn walk(provider: Arc<dyn DataProvider>, path: &BrowsePath) -> Result<SelectionSnapshot> {
    let session = DashboardSession::new("cli", provider);
    session.load_clusters().await;
    ensure_reachable(&session)?;

    if let Some(cluster) = &path.cluster {
        session.select_cluster(Some(cluster.as_str())).await?;
        ensure_reachable(&session)?;
    }
    if let Some(namespace) = &path.namespace {
        session.select_namespace(Some(namespace.as_str())).await?;
        ensure_reachable(&session)?;
    }
    if let Some(workload) = &path.workload {
        session.select_workload(Some(workload.as_str())).await?;
        ensure_reachable(&session)?;
    }

    Ok(session.snapshot().await)
}

pub fn breadcrumb(snapshot: &SelectionSnapshot) -> String {
    [
        (snapshot.selected_cluster_name(), "Select Cluster"),
        (snapshot.selected_namespace_name(), "Select Namespace"),
        (snapshot.selected_workload_name(), "Select Workload"),
    ]
    .into_iter()
    .map(|(name, placeholder)| match name {
        Some(name) => name.bold().to_string(),
        None => placeholder.dimmed().to_string(),
    })
    .collect::<Vec<_>>()
    .join(" › ")
}

pub async fn browse(provider: Arc<dyn DataProvider>, path: BrowsePath, format: OutputFormat) -> Result<()> {
    let snapshot = walk(provider, &path).await?;

    if let OutputFormat::Json = format {
        return print_json(&snapshot);
    }

    println!("{}", breadcrumb(&snapshot));
    println!();

    if snapshot.selected_cluster.is_none() {
        print_info("Pick a cluster with --cluster <ID>");
        print_list(cluster_rows(&snapshot.clusters), &snapshot.clusters, format)
    } else if snapshot.selected_namespace.is_none() {
        print_info("Pick a namespace with --namespace <ID>");
        print_list(namespace_rows(&snapshot.namespaces), &snapshot.namespaces, format)
    } else if snapshot.selected_workload.is_none() {
        print_info("Pick a workload with --workload <ID>");
        print_list(workload_rows(&snapshot.workloads), &snapshot.workloads, format)
    } else {
        print_metrics(snapshot.metrics.as_ref(), None, format)
    }
}
