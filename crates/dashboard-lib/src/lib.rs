//! Core library for the cluster resource manager dashboard
//!
//! This crate provides:
//! - The cluster / namespace / workload data model
//! - The data provider contract and its static mock tables
//! - The cascading selection state machine
//! - Current-versus-recommended comparison math
//! - Health checks and observability

pub mod comparison;
pub mod health;
pub mod models;
pub mod observability;
pub mod provider;
pub mod selection;

pub use comparison::{compare, MeasurementComparison, SavingsSummary, Tone, Trend, WorkloadComparison};
pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use models::*;
pub use observability::{DashboardMetrics, StructuredLogger};
pub use provider::{DataProvider, InstrumentedProvider, LatencyProfile, MockProvider, ProviderError};
pub use selection::{
    DashboardSession, FetchTicket, Level, LoadingFlags, SelectionError, SelectionSnapshot,
    SelectionState,
};
