//! Cluster resource dashboard service
//!
//! Serves the server-rendered dashboard, the JSON provider API and the
//! health/metrics endpoints.

pub mod api;
pub mod config;
pub mod sessions;
pub mod view;
