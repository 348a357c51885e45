//! Current versus recommended comparison for one workload

use anyhow::Result;
use colored::Colorize;
use dashboard_lib::{compare, DataProvider, ResourceMetrics, WorkloadComparison};
use tabled::{settings::Style, Table, Tabled};

use crate::output::{color_savings, color_trend, format_measurement, print_json, print_warning, OutputFormat};

#[derive(Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Resource")]
    resource: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Recommended")]
    recommended: String,
    #[tabled(rename = "Change")]
    change: String,
}

fn comparison_rows(comparison: &WorkloadComparison) -> Vec<ComparisonRow> {
    comparison
        .rows()
        .into_iter()
        .map(|row| ComparisonRow {
            resource: row.label.to_string(),
            current: format_measurement(row.current, &row.unit),
            recommended: format_measurement(row.recommended, &row.unit),
            change: color_trend(row),
        })
        .collect()
}

/// Comparison table plus the savings banner
pub fn render_comparison(metrics: &ResourceMetrics) -> String {
    let comparison = compare(metrics);
    let table = Table::new(comparison_rows(&comparison))
        .with(Style::rounded())
        .to_string();

    match color_savings(&comparison.savings) {
        Some(banner) => format!("{table}\n{banner}"),
        None => table,
    }
}

/// Print the comparison, or the empty state when metrics are unavailable
pub fn print_metrics(
    metrics: Option<&ResourceMetrics>,
    message: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    match (metrics, format) {
        (Some(metrics), OutputFormat::Table) => {
            println!("{}", "Current vs Recommended".bold());
            println!("{}", render_comparison(metrics));
        }
        (Some(metrics), OutputFormat::Json) => print_json(&compare(metrics))?,
        (None, OutputFormat::Table) => {
            print_warning("No Data Available");
            println!(
                "{}",
                message
                    .unwrap_or("Resource metrics could not be loaded for the selected workload.")
                    .dimmed()
            );
        }
        (None, OutputFormat::Json) => print_json(&serde_json::Value::Null)?,
    }
    Ok(())
}

pub async fn compare_workload(
    provider: &dyn DataProvider,
    workload_id: &str,
    format: OutputFormat,
) -> Result<()> {
    let response = provider.get_resource_metrics(workload_id).await?;
    let message = response.message.clone();
    let metrics = response.into_data();

    print_metrics(metrics.as_ref(), message.as_deref(), format)
}
