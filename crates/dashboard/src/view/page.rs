//! Root dashboard layout

use super::{escape, Breadcrumb, Dropdown, DropdownOption, ResourceCard};
use dashboard_lib::SelectionSnapshot;

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: #f5f7fb; color: #111827; }
.topbar { background: #fff; border-bottom: 1px solid #e5e7eb; padding: 16px 32px; }
.topbar h1 { margin: 0; font-size: 20px; }
.topbar p { margin: 4px 0 0; color: #6b7280; font-size: 14px; }
main { max-width: 1200px; margin: 0 auto; padding: 32px; }
.breadcrumb { display: flex; gap: 8px; align-items: center; margin-bottom: 32px; font-size: 14px; }
.crumb { padding: 6px 12px; border-radius: 8px; background: #f3f4f6; color: #6b7280; }
.crumb.active { background: #dbeafe; color: #1e40af; }
.panel, .card, .empty { background: #fff; border: 1px solid #e5e7eb; border-radius: 12px; padding: 24px; margin-bottom: 32px; }
.pickers { display: grid; grid-template-columns: repeat(3, 1fr); gap: 24px; }
.pickers label { display: block; font-weight: 500; margin-bottom: 8px; }
.pickers select { width: 100%; padding: 10px; border-radius: 8px; }
.loading { padding: 12px; border: 1px solid #d1d5db; border-radius: 8px; color: #6b7280; }
.badge { display: inline-block; padding: 2px 8px; border-radius: 999px; font-size: 12px; margin-top: 4px; }
.badge-green { background: #dcfce7; color: #166534; }
.badge-blue { background: #dbeafe; color: #1e40af; }
.badge-gray { background: #f3f4f6; color: #1f2937; }
.comparison { display: grid; grid-template-columns: 1fr 1fr; gap: 32px; }
.card.highlight { border: 2px solid #bfdbfe; background: #eff6ff; }
.savings { display: inline-block; padding: 4px 12px; border-radius: 999px; margin-top: 12px; font-size: 14px; }
.savings.positive { background: #dcfce7; color: #166534; }
.savings.negative { background: #fee2e2; color: #991b1b; }
.resource-row { display: flex; justify-content: space-between; padding: 12px 0; border-bottom: 1px solid #f3f4f6; }
.resource-values { text-align: right; }
.current { font-size: 18px; font-weight: 600; }
.recommended { color: #6b7280; font-size: 14px; }
.tone-good { color: #16a34a; } .tone-bad { color: #dc2626; } .tone-neutral { color: #4b5563; }
.empty { text-align: center; padding: 48px; }
"#;

fn picker(label: &str, loading_text: &str, busy: bool, dropdown: Dropdown<'_>) -> String {
    let body = if busy {
        format!(r#"<div class="loading">{}</div>"#, escape(loading_text))
    } else {
        dropdown.render()
    };
    format!(
        r#"<div class="picker"><label>{}</label>{}</div>"#,
        escape(label),
        body
    )
}

fn empty_state(heading: &str, text: &str) -> String {
    format!(
        r#"<div class="empty"><h3>{}</h3><p>{}</p></div>"#,
        escape(heading),
        escape(text)
    )
}

fn comparison_section(snapshot: &SelectionSnapshot) -> String {
    if snapshot.selected_workload.is_none() {
        return empty_state(
            "Select a Workload",
            "Choose a cluster, namespace, and workload to view current and recommended resource allocations.",
        );
    }

    if snapshot.loading.metrics {
        return r#"<div class="empty loading-metrics">Loading resource metrics...</div>"#.to_string();
    }

    match &snapshot.metrics {
        Some(metrics) => {
            let recommended = metrics.as_recommended();
            let current_card = ResourceCard {
                title: "Current Resources",
                subtitle: "Current resource allocation and usage",
                metrics,
                highlight: false,
            };
            let recommended_card = ResourceCard {
                title: "Recommended Resources",
                subtitle: "AI-optimized resource recommendations",
                metrics: &recommended,
                highlight: true,
            };
            format!(
                r#"<div class="comparison">{}{}</div>"#,
                current_card.render(),
                recommended_card.render()
            )
        }
        None => empty_state(
            "No Data Available",
            "Resource metrics could not be loaded for the selected workload.",
        ),
    }
}

/// Render the whole dashboard for one page view
pub fn render_page(view_id: &str, snapshot: &SelectionSnapshot) -> String {
    let action = format!("/view/{view_id}/select");

    let breadcrumb = Breadcrumb {
        cluster: snapshot.selected_cluster_name(),
        namespace: snapshot.selected_namespace_name(),
        workload: snapshot.selected_workload_name(),
    };

    let clusters = Dropdown {
        name: "cluster",
        action: &action,
        options: snapshot
            .clusters
            .iter()
            .map(|c| DropdownOption {
                id: c.id.clone(),
                label: c.name.clone(),
                sublabel: Some(c.region.clone()),
                status: Some(c.status.to_string()),
            })
            .collect(),
        selected_id: snapshot.selected_cluster.as_deref(),
        placeholder: "Select a cluster",
        disabled: false,
    };

    let namespaces = Dropdown {
        name: "namespace",
        action: &action,
        options: snapshot
            .namespaces
            .iter()
            .map(|ns| DropdownOption {
                id: ns.id.clone(),
                label: ns.name.clone(),
                sublabel: Some(format!("{} resources", ns.resource_count)),
                status: None,
            })
            .collect(),
        selected_id: snapshot.selected_namespace.as_deref(),
        placeholder: "Select a namespace",
        disabled: snapshot.selected_cluster.is_none(),
    };

    let workloads = Dropdown {
        name: "workload",
        action: &action,
        options: snapshot
            .workloads
            .iter()
            .map(|wl| DropdownOption {
                id: wl.id.clone(),
                label: wl.name.clone(),
                sublabel: Some(wl.kind.to_string()),
                status: Some(wl.status.to_string()),
            })
            .collect(),
        selected_id: snapshot.selected_workload.as_deref(),
        placeholder: "Select a workload",
        disabled: snapshot.selected_namespace.is_none(),
    };

    let pickers = [
        picker("Cluster", "Loading clusters...", snapshot.loading.clusters, clusters),
        picker("Namespace", "Loading namespaces...", snapshot.loading.namespaces, namespaces),
        picker("Workload", "Loading workloads...", snapshot.loading.workloads, workloads),
    ]
    .concat();

    // Poll until every in-flight lookup has landed
    let refresh = if snapshot.loading.any() {
        r#"<meta http-equiv="refresh" content="1">"#
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
{refresh}
<title>Cluster Resource Manager</title>
<style>{STYLE}</style>
</head>
<body>
<header class="topbar"><h1>Cluster Resource Manager</h1><p>Optimize your Kubernetes workloads</p></header>
<main>
{breadcrumb}
<section class="panel"><h2>Resource Selection</h2><div class="pickers">{pickers}</div></section>
{comparison}
</main>
</body>
</html>
"#,
        breadcrumb = breadcrumb.render(),
        comparison = comparison_section(snapshot),
    )
}
