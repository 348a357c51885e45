//! Subcommand implementations

pub mod browse;
pub mod compare;
pub mod list;
