//! Current / recommended comparison card

use super::escape;
use dashboard_lib::comparison::{compare, MeasurementComparison, Tone, Trend};
use dashboard_lib::ResourceMetrics;

#[derive(Debug, Clone)]
pub struct ResourceCard<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub metrics: &'a ResourceMetrics,
    /// Emphasized border for the recommended side
    pub highlight: bool,
}

fn tone_class(tone: Tone) -> &'static str {
    match tone {
        Tone::Neutral => "tone-neutral",
        Tone::Unfavourable => "tone-bad",
        Tone::Favourable => "tone-good",
    }
}

fn trend_class(trend: Trend) -> &'static str {
    match trend {
        Trend::Flat => "trend-flat",
        Trend::Increase => "trend-up",
        Trend::Decrease => "trend-down",
    }
}

fn render_row(row: &MeasurementComparison) -> String {
    let unit = escape(&row.unit);
    format!(
        r#"<div class="resource-row"><div class="resource-label"><div class="label">{label}</div><div class="change {tone}"><span class="{trend}">{arrow}</span> {percent:.1}%</div></div><div class="resource-values"><div class="current">{current} {unit}</div><div class="recommended">→ {recommended} {unit}</div></div></div>"#,
        label = escape(row.label),
        tone = tone_class(row.trend.tone()),
        trend = trend_class(row.trend),
        arrow = row.trend.arrow(),
        percent = row.percent_change.abs(),
        current = row.current,
        recommended = row.recommended,
    )
}

impl ResourceCard<'_> {
    pub fn render(&self) -> String {
        let comparison = compare(self.metrics);

        let banner = match comparison.savings.banner() {
            Some(text) => {
                let class = if comparison.savings.is_saving() {
                    "savings positive"
                } else {
                    "savings negative"
                };
                format!(r#"<div class="{class}">{}</div>"#, escape(&text))
            }
            None => String::new(),
        };

        let rows: String = comparison.rows().into_iter().map(render_row).collect();

        format!(
            r#"<section class="card{highlight}"><header><h3>{title}</h3><p>{subtitle}</p>{banner}</header><div class="resource-rows">{rows}</div></section>"#,
            highlight = if self.highlight { " highlight" } else { "" },
            title = escape(self.title),
            subtitle = escape(self.subtitle),
        )
    }
}
