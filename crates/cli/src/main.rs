//! Cluster Resource Manager CLI
//!
//! Lists clusters, namespaces and workloads from a running dashboard and
//! compares a workload's current resources with the recommended ones.

mod client;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{browse, compare, list};
use dashboard_lib::DataProvider;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Cluster Resource Manager CLI
#[derive(Parser)]
#[command(name = "crm")]
#[command(author, version, about = "CLI for Cluster Resource Manager", long_about = None)]
pub struct Cli {
    /// Dashboard URL (can also be set via CRM_API_URL env var or the config file)
    #[arg(long, env = "CRM_API_URL")]
    pub api_url: Option<String>,

    /// Output format
    #[arg(long, short)]
    pub format: Option<output::OutputFormat>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List clusters
    Clusters,

    /// List namespaces of a cluster
    Namespaces {
        /// Cluster ID
        cluster_id: String,
    },

    /// List workloads of a namespace
    Workloads {
        /// Namespace ID
        namespace_id: String,
    },

    /// Compare current and recommended resources of a workload
    Compare {
        /// Workload ID
        workload_id: String,
    },

    /// Walk cluster, namespace and workload selection like the dashboard
    Browse {
        /// Cluster ID to select
        #[arg(long, short)]
        cluster: Option<String>,

        /// Namespace ID to select (requires --cluster)
        #[arg(long, short)]
        namespace: Option<String>,

        /// Workload ID to select (requires --namespace)
        #[arg(long, short)]
        workload: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("debug"))
            .with_writer(std::io::stderr)
            .init();
    }

    let config = config::Config::load()?;
    let format = config.format(cli.format);
    let provider: Arc<dyn DataProvider> =
        Arc::new(client::HttpProvider::new(&config.api_url(cli.api_url))?);

    // Execute command
    match cli.command {
        Commands::Clusters => list::list_clusters(provider.as_ref(), format).await?,
        Commands::Namespaces { cluster_id } => {
            list::list_namespaces(provider.as_ref(), &cluster_id, format).await?
        }
        Commands::Workloads { namespace_id } => {
            list::list_workloads(provider.as_ref(), &namespace_id, format).await?
        }
        Commands::Compare { workload_id } => {
            compare::compare_workload(provider.as_ref(), &workload_id, format).await?
        }
        Commands::Browse {
            cluster,
            namespace,
            workload,
        } => {
            let path = browse::BrowsePath {
                cluster,
                namespace,
                workload,
            };
            browse::browse(provider, path, format).await?
        }
    }

    Ok(())
}
