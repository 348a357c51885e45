//! Current versus recommended comparison
//!
//! Derives per-measurement differences, trend direction and the monthly
//! savings summary shown next to a workload's metrics.

use crate::models::{Measurement, ResourceMetrics};
use serde::Serialize;

/// Changes smaller than this (in percent) are shown as flat
pub const FLAT_THRESHOLD_PERCENT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Flat,
    Increase,
    Decrease,
}

/// How a change should be colored: more usage or cost is bad news
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Neutral,
    Unfavourable,
    Favourable,
}

impl Trend {
    pub fn from_percent(percent_change: f64) -> Self {
        if percent_change.abs() < FLAT_THRESHOLD_PERCENT {
            Trend::Flat
        } else if percent_change > 0.0 {
            Trend::Increase
        } else {
            Trend::Decrease
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Trend::Flat => Tone::Neutral,
            Trend::Increase => Tone::Unfavourable,
            Trend::Decrease => Tone::Favourable,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Flat => "–",
            Trend::Increase => "↑",
            Trend::Decrease => "↓",
        }
    }
}

/// Derived view of one current / recommended pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementComparison {
    pub label: &'static str,
    pub current: f64,
    pub recommended: f64,
    pub unit: String,
    /// `recommended - current`
    pub difference: f64,
    /// Difference relative to current, 0 when current is not positive
    pub percent_change: f64,
    pub trend: Trend,
}

impl MeasurementComparison {
    pub fn new(label: &'static str, measurement: &Measurement) -> Self {
        let difference = measurement.recommended - measurement.current;
        let percent_change = percent_of(difference, measurement.current);
        Self {
            label,
            current: measurement.current,
            recommended: measurement.recommended,
            unit: measurement.unit.clone(),
            difference,
            percent_change,
            trend: Trend::from_percent(percent_change),
        }
    }
}

/// Monthly cost delta; positive amounts are savings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SavingsSummary {
    pub amount: f64,
    pub percent: f64,
}

impl SavingsSummary {
    pub fn from_cost(cost: &Measurement) -> Self {
        let amount = cost.current - cost.recommended;
        Self {
            amount,
            percent: percent_of(amount, cost.current),
        }
    }

    pub fn is_saving(&self) -> bool {
        self.amount > 0.0
    }

    /// Banner text, or `None` when the recommendation does not change cost
    pub fn banner(&self) -> Option<String> {
        if self.amount == 0.0 {
            return None;
        }
        let heading = if self.is_saving() {
            "Potential Savings"
        } else {
            "Additional Cost"
        };
        Some(format!(
            "{}: ${:.2}/month ({:.1}%)",
            heading,
            self.amount.abs(),
            self.percent.abs()
        ))
    }
}

/// All four measurement comparisons plus the savings summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadComparison {
    pub cpu: MeasurementComparison,
    pub memory: MeasurementComparison,
    pub replicas: MeasurementComparison,
    pub cost_per_month: MeasurementComparison,
    pub savings: SavingsSummary,
}

impl WorkloadComparison {
    /// Rows in display order
    pub fn rows(&self) -> [&MeasurementComparison; 4] {
        [&self.cpu, &self.memory, &self.replicas, &self.cost_per_month]
    }
}

pub fn compare(metrics: &ResourceMetrics) -> WorkloadComparison {
    WorkloadComparison {
        cpu: MeasurementComparison::new("CPU Usage", &metrics.cpu),
        memory: MeasurementComparison::new("Memory Usage", &metrics.memory),
        replicas: MeasurementComparison::new("Replica Count", &metrics.replicas),
        cost_per_month: MeasurementComparison::new("Monthly Cost", &metrics.cost_per_month),
        savings: SavingsSummary::from_cost(&metrics.cost_per_month),
    }
}

fn percent_of(delta: f64, base: f64) -> f64 {
    if base > 0.0 {
        delta / base * 100.0
    } else {
        0.0
    }
}
