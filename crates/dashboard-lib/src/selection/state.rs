//! Cascading selection state machine
//!
//! Cluster → namespace → workload → metrics. Changing a level resets every
//! level below it synchronously and hands out a [`FetchTicket`] for the list
//! that now needs loading. Responses are applied only while their ticket is
//! still current, so a slow answer for an abandoned selection never lands.

use crate::models::{Cluster, Namespace, ResourceMetrics, Workload};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A fetchable level of the cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Clusters,
    Namespaces,
    Workloads,
    Metrics,
}

impl Level {
    pub const ALL: [Level; 4] = [
        Level::Clusters,
        Level::Namespaces,
        Level::Workloads,
        Level::Metrics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Clusters => "clusters",
            Level::Namespaces => "namespaces",
            Level::Workloads => "workloads",
            Level::Metrics => "metrics",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// This level and every level below it
    fn and_below(self) -> impl Iterator<Item = Level> {
        Level::ALL.into_iter().skip(self.index())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one in-flight request and the selection it was issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    level: Level,
    key: Option<String>,
    generation: u64,
}

impl FetchTicket {
    pub fn level(&self) -> Level {
        self.level
    }

    /// Parent id the request was issued for; `None` for the cluster list
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Busy indicator per level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadingFlags {
    pub clusters: bool,
    pub namespaces: bool,
    pub workloads: bool,
    pub metrics: bool,
}

impl LoadingFlags {
    pub fn any(&self) -> bool {
        self.clusters || self.namespaces || self.workloads || self.metrics
    }

    pub fn get(&self, level: Level) -> bool {
        match level {
            Level::Clusters => self.clusters,
            Level::Namespaces => self.namespaces,
            Level::Workloads => self.workloads,
            Level::Metrics => self.metrics,
        }
    }

    fn set(&mut self, level: Level, busy: bool) {
        match level {
            Level::Clusters => self.clusters = busy,
            Level::Namespaces => self.namespaces = busy,
            Level::Workloads => self.workloads = busy,
            Level::Metrics => self.metrics = busy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("cannot select a {child} before a {parent} is selected")]
    ParentNotSelected {
        child: &'static str,
        parent: &'static str,
    },
    #[error("{kind} '{id}' is not among the loaded options")]
    UnknownOption { kind: &'static str, id: String },
}

/// Serializable view of the selection state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSnapshot {
    pub clusters: Vec<Cluster>,
    pub namespaces: Vec<Namespace>,
    pub workloads: Vec<Workload>,
    pub metrics: Option<ResourceMetrics>,
    pub selected_cluster: Option<String>,
    pub selected_namespace: Option<String>,
    pub selected_workload: Option<String>,
    pub loading: LoadingFlags,
}

impl SelectionSnapshot {
    pub fn selected_cluster_name(&self) -> Option<&str> {
        let id = self.selected_cluster.as_deref()?;
        self.clusters
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }

    pub fn selected_namespace_name(&self) -> Option<&str> {
        let id = self.selected_namespace.as_deref()?;
        self.namespaces
            .iter()
            .find(|ns| ns.id == id)
            .map(|ns| ns.name.as_str())
    }

    pub fn selected_workload_name(&self) -> Option<&str> {
        let id = self.selected_workload.as_deref()?;
        self.workloads
            .iter()
            .find(|wl| wl.id == id)
            .map(|wl| wl.name.as_str())
    }
}

/// Mutable selection state owned by one page view
#[derive(Debug, Default)]
pub struct SelectionState {
    clusters: Vec<Cluster>,
    namespaces: Vec<Namespace>,
    workloads: Vec<Workload>,
    metrics: Option<ResourceMetrics>,
    selected_cluster: Option<String>,
    selected_namespace: Option<String>,
    selected_workload: Option<String>,
    loading: LoadingFlags,
    generations: [u64; 4],
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loading(&self) -> LoadingFlags {
        self.loading
    }

    pub fn selected_cluster(&self) -> Option<&str> {
        self.selected_cluster.as_deref()
    }

    pub fn selected_namespace(&self) -> Option<&str> {
        self.selected_namespace.as_deref()
    }

    pub fn selected_workload(&self) -> Option<&str> {
        self.selected_workload.as_deref()
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    pub fn workloads(&self) -> &[Workload] {
        &self.workloads
    }

    pub fn metrics(&self) -> Option<&ResourceMetrics> {
        self.metrics.as_ref()
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            clusters: self.clusters.clone(),
            namespaces: self.namespaces.clone(),
            workloads: self.workloads.clone(),
            metrics: self.metrics.clone(),
            selected_cluster: self.selected_cluster.clone(),
            selected_namespace: self.selected_namespace.clone(),
            selected_workload: self.selected_workload.clone(),
            loading: self.loading,
        }
    }

    /// Start (or restart) loading the cluster list
    pub fn begin_clusters(&mut self) -> FetchTicket {
        self.issue(Level::Clusters, None)
    }

    /// Select a cluster, or clear it with `None`
    ///
    /// Returns the ticket for the namespace fetch, or `None` when nothing
    /// needs loading (cleared, or re-selecting the current cluster).
    pub fn select_cluster(&mut self, id: Option<&str>) -> Result<Option<FetchTicket>, SelectionError> {
        if id.is_some() && id == self.selected_cluster() {
            return Ok(None);
        }
        if let Some(id) = id {
            if !self.clusters.iter().any(|c| c.id == id) {
                return Err(unknown("cluster", id));
            }
        }

        self.selected_cluster = id.map(str::to_string);
        self.reset_from(Level::Namespaces);
        Ok(id.map(|id| self.issue(Level::Namespaces, Some(id))))
    }

    /// Select a namespace of the current cluster, or clear it with `None`
    pub fn select_namespace(&mut self, id: Option<&str>) -> Result<Option<FetchTicket>, SelectionError> {
        if id.is_some() && id == self.selected_namespace() {
            return Ok(None);
        }
        if let Some(id) = id {
            if self.selected_cluster.is_none() {
                return Err(SelectionError::ParentNotSelected {
                    child: "namespace",
                    parent: "cluster",
                });
            }
            if !self.namespaces.iter().any(|ns| ns.id == id) {
                return Err(unknown("namespace", id));
            }
        }

        self.selected_namespace = id.map(str::to_string);
        self.reset_from(Level::Workloads);
        Ok(id.map(|id| self.issue(Level::Workloads, Some(id))))
    }

    /// Select a workload of the current namespace, or clear it with `None`
    pub fn select_workload(&mut self, id: Option<&str>) -> Result<Option<FetchTicket>, SelectionError> {
        if id.is_some() && id == self.selected_workload() {
            return Ok(None);
        }
        if let Some(id) = id {
            if self.selected_namespace.is_none() {
                return Err(SelectionError::ParentNotSelected {
                    child: "workload",
                    parent: "namespace",
                });
            }
            if !self.workloads.iter().any(|wl| wl.id == id) {
                return Err(unknown("workload", id));
            }
        }

        self.selected_workload = id.map(str::to_string);
        self.reset_from(Level::Metrics);
        Ok(id.map(|id| self.issue(Level::Metrics, Some(id))))
    }

    /// Whether a response for `ticket` would still be applied
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.generations[ticket.level.index()] == ticket.generation
    }

    pub fn apply_clusters(&mut self, ticket: &FetchTicket, clusters: Option<Vec<Cluster>>) -> bool {
        self.settle(ticket, Level::Clusters, |state| {
            state.clusters = clusters.unwrap_or_default();
        })
    }

    pub fn apply_namespaces(
        &mut self,
        ticket: &FetchTicket,
        namespaces: Option<Vec<Namespace>>,
    ) -> bool {
        self.settle(ticket, Level::Namespaces, |state| {
            state.namespaces = namespaces.unwrap_or_default();
        })
    }

    pub fn apply_workloads(&mut self, ticket: &FetchTicket, workloads: Option<Vec<Workload>>) -> bool {
        self.settle(ticket, Level::Workloads, |state| {
            state.workloads = workloads.unwrap_or_default();
        })
    }

    pub fn apply_metrics(&mut self, ticket: &FetchTicket, metrics: Option<ResourceMetrics>) -> bool {
        self.settle(ticket, Level::Metrics, |state| {
            state.metrics = metrics;
        })
    }

    fn issue(&mut self, level: Level, key: Option<&str>) -> FetchTicket {
        let generation = &mut self.generations[level.index()];
        *generation += 1;
        self.loading.set(level, true);
        FetchTicket {
            level,
            key: key.map(str::to_string),
            generation: *generation,
        }
    }

    /// Clear `level` and everything below it, invalidating in-flight requests
    fn reset_from(&mut self, level: Level) {
        for lower in level.and_below() {
            self.generations[lower.index()] += 1;
            self.loading.set(lower, false);
            match lower {
                Level::Clusters => self.clusters.clear(),
                Level::Namespaces => {
                    self.namespaces.clear();
                    self.selected_namespace = None;
                }
                Level::Workloads => {
                    self.workloads.clear();
                    self.selected_workload = None;
                }
                Level::Metrics => self.metrics = None,
            }
        }
    }

    fn settle(&mut self, ticket: &FetchTicket, level: Level, apply: impl FnOnce(&mut Self)) -> bool {
        if ticket.level != level || !self.is_current(ticket) {
            return false;
        }
        apply(self);
        self.loading.set(level, false);
        true
    }
}

fn unknown(kind: &'static str, id: &str) -> SelectionError {
    SelectionError::UnknownOption {
        kind,
        id: id.to_string(),
    }
}
