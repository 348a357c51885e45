//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use dashboard_lib::{MeasurementComparison, SavingsSummary, Tone, COST_UNIT};
use serde::{Deserialize, Serialize};
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print rows as a table, or `items` as JSON
pub fn print_list<R: Tabled, T: Serialize>(rows: Vec<R>, items: &T, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("{}", "No items found".yellow());
            } else {
                println!("{}", Table::new(rows).with(Style::rounded()));
            }
        }
        OutputFormat::Json => print_json(items)?,
    }
    Ok(())
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Format currency
pub fn format_currency(amount: f64, currency: &str) -> String {
    match currency {
        COST_UNIT => format!("${:.2}", amount),
        _ => format!("{:.2} {}", amount, currency),
    }
}

/// Value with its unit; money is rendered as currency
pub fn format_measurement(value: f64, unit: &str) -> String {
    match unit {
        COST_UNIT => format_currency(value, unit),
        _ => format!("{} {}", value, unit),
    }
}

/// Color status based on value
pub fn color_status(status: &str) -> String {
    match status.to_lowercase().as_str() {
        "active" | "running" => status.green().to_string(),
        "pending" => status.yellow().to_string(),
        "inactive" | "error" => status.red().to_string(),
        _ => status.to_string(),
    }
}

/// Arrow plus absolute percent, colored by whether the change is welcome
pub fn color_trend(comparison: &MeasurementComparison) -> String {
    let text = format!(
        "{} {:.1}%",
        comparison.trend.arrow(),
        comparison.percent_change.abs()
    );
    match comparison.trend.tone() {
        Tone::Favourable => text.green().to_string(),
        Tone::Unfavourable => text.red().to_string(),
        Tone::Neutral => text.dimmed().to_string(),
    }
}

pub fn color_savings(savings: &SavingsSummary) -> Option<String> {
    let banner = savings.banner()?;
    Some(if savings.is_saving() {
        banner.green().bold().to_string()
    } else {
        banner.red().bold().to_string()
    })
}
