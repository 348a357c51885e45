//! Core data models for the dashboard
//!
//! JSON field names follow the provider API (camelCase).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle label of a cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterStatus {
    Active,
    Inactive,
    Pending,
}

impl ClusterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterStatus::Active => "active",
            ClusterStatus::Inactive => "inactive",
            ClusterStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for ClusterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Controller kind of a workload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadKind {
    Deployment,
    Statefulset,
    Daemonset,
}

impl WorkloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadKind::Deployment => "deployment",
            WorkloadKind::Statefulset => "statefulset",
            WorkloadKind::Daemonset => "daemonset",
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime status of a workload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadStatus {
    Running,
    Pending,
    Error,
}

impl WorkloadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadStatus::Running => "running",
            WorkloadStatus::Pending => "pending",
            WorkloadStatus::Error => "error",
        }
    }
}

impl fmt::Display for WorkloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: String,
    pub name: String,
    pub region: String,
    pub status: ClusterStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    pub id: String,
    pub name: String,
    pub cluster_id: String,
    pub resource_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workload {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: WorkloadKind,
    pub namespace_id: String,
    pub status: WorkloadStatus,
}

pub const CPU_UNIT: &str = "cores";
pub const MEMORY_UNIT: &str = "GB";
pub const REPLICAS_UNIT: &str = "pods";
pub const COST_UNIT: &str = "USD";

/// A current / recommended value pair with its unit label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub current: f64,
    pub recommended: f64,
    pub unit: String,
}

impl Measurement {
    pub fn new(current: f64, recommended: f64, unit: impl Into<String>) -> Self {
        Self {
            current,
            recommended,
            unit: unit.into(),
        }
    }

    /// The recommended side presented as if it were already applied
    pub fn settled(&self) -> Self {
        Self::new(self.recommended, self.recommended, self.unit.clone())
    }
}

/// Current and recommended allocation for one workload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetrics {
    pub cpu: Measurement,
    pub memory: Measurement,
    pub replicas: Measurement,
    pub cost_per_month: Measurement,
}

impl Default for ResourceMetrics {
    /// Placeholder payload carried by unsuccessful metrics responses
    fn default() -> Self {
        Self {
            cpu: Measurement::new(0.0, 0.0, CPU_UNIT),
            memory: Measurement::new(0.0, 0.0, MEMORY_UNIT),
            replicas: Measurement::new(0.0, 0.0, REPLICAS_UNIT),
            cost_per_month: Measurement::new(0.0, 0.0, COST_UNIT),
        }
    }
}

impl ResourceMetrics {
    /// Copy whose current values equal the recommended ones
    pub fn as_recommended(&self) -> Self {
        Self {
            cpu: self.cpu.settled(),
            memory: self.memory.settled(),
            replicas: self.replicas.settled(),
            cost_per_month: self.cost_per_month.settled(),
        }
    }
}

/// Envelope returned by every provider operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            success: true,
            message: Some(message.into()),
        }
    }

    pub fn failure(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            success: false,
            message: Some(message.into()),
        }
    }

    /// Successful payload, if any
    pub fn into_data(self) -> Option<T> {
        self.success.then_some(self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workload_serializes_kind_as_type() {
        let workload = Workload {
            id: "wl-3".to_string(),
            name: "redis-cache".to_string(),
            kind: WorkloadKind::Statefulset,
            namespace_id: "ns-1".to_string(),
            status: WorkloadStatus::Running,
        };

        let json = serde_json::to_value(&workload).unwrap();
        assert_eq!(json["type"], "statefulset");
        assert_eq!(json["namespaceId"], "ns-1");
        assert_eq!(json["status"], "running");
    }

    #[test]
    fn test_metrics_use_camel_case_cost_field() {
        let json = serde_json::to_value(ResourceMetrics::default()).unwrap();
        assert!(json.get("costPerMonth").is_some());
        assert_eq!(json["costPerMonth"]["unit"], "USD");
        assert_eq!(json["cpu"]["unit"], "cores");
    }

    #[test]
    fn test_as_recommended_copies_recommended_values() {
        let metrics = ResourceMetrics {
            cpu: Measurement::new(2.5, 1.8, CPU_UNIT),
            memory: Measurement::new(4.0, 2.8, MEMORY_UNIT),
            replicas: Measurement::new(5.0, 3.0, REPLICAS_UNIT),
            cost_per_month: Measurement::new(245.6, 172.8, COST_UNIT),
        };

        let settled = metrics.as_recommended();
        assert_eq!(settled.cpu.current, 1.8);
        assert_eq!(settled.cpu.recommended, 1.8);
        assert_eq!(settled.cost_per_month.current, 172.8);
        assert_eq!(settled.replicas.unit, "pods");
    }

    #[test]
    fn test_api_response_message_is_optional() {
        let parsed: ApiResponse<Vec<Cluster>> =
            serde_json::from_str(r#"{"data": [], "success": true}"#).unwrap();
        assert!(parsed.success);
        assert!(parsed.message.is_none());
        assert_eq!(parsed.into_data(), Some(vec![]));

        let failed = ApiResponse::failure(ResourceMetrics::default(), "Resource metrics not found");
        assert!(failed.into_data().is_none());
    }
}
