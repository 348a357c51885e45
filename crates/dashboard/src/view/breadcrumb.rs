//! Navigation trail showing the current selection

use super::escape;

/// Cluster › namespace › workload trail
#[derive(Debug, Clone, Copy, Default)]
pub struct Breadcrumb<'a> {
    pub cluster: Option<&'a str>,
    pub namespace: Option<&'a str>,
    pub workload: Option<&'a str>,
}

impl Breadcrumb<'_> {
    pub fn render(&self) -> String {
        let items = [
            (self.cluster, "Select Cluster", "server"),
            (self.namespace, "Select Namespace", "package"),
            (self.workload, "Select Workload", "layers"),
        ];

        let crumbs: Vec<String> = items
            .into_iter()
            .map(|(name, placeholder, icon)| {
                let class = if name.is_some() { "crumb active" } else { "crumb" };
                format!(
                    r#"<span class="{class}" data-icon="{icon}">{}</span>"#,
                    escape(name.unwrap_or(placeholder))
                )
            })
            .collect();

        format!(
            r#"<nav class="breadcrumb">{}</nav>"#,
            crumbs.join(r#"<span class="separator">›</span>"#)
        )
    }
}
