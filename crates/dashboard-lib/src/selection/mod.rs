//! Cluster → namespace → workload selection
//!
//! This module provides:
//! - The synchronous cascade state machine with per-level busy flags
//! - Request tickets that keep stale responses from overwriting newer state
//! - An async session that drives the cascade against a data provider

mod session;
mod state;


pub use session::DashboardSession;
pub use state::{
    FetchTicket, Level, LoadingFlags, SelectionError, SelectionSnapshot, SelectionState,
};
