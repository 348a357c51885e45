//! Labeled option picker

use super::escape;

#[derive(Debug, Clone, PartialEq)]
pub struct DropdownOption {
    pub id: String,
    pub label: String,
    pub sublabel: Option<String>,
    pub status: Option<String>,
}

/// CSS class for a status badge
pub fn status_tone(status: &str) -> &'static str {
    match status {
        "active" => "badge badge-green",
        "running" => "badge badge-blue",
        _ => "badge badge-gray",
    }
}

/// A `<select>` that submits its form as soon as the choice changes
#[derive(Debug, Clone)]
pub struct Dropdown<'a> {
    /// Query parameter carrying the chosen id
    pub name: &'a str,
    /// Form target
    pub action: &'a str,
    pub options: Vec<DropdownOption>,
    pub selected_id: Option<&'a str>,
    pub placeholder: &'a str,
    pub disabled: bool,
}

impl Dropdown<'_> {
    pub fn selected_option(&self) -> Option<&DropdownOption> {
        let id = self.selected_id?;
        self.options.iter().find(|option| option.id == id)
    }

    pub fn render(&self) -> String {
        let mut html = format!(
            r#"<form class="dropdown" method="get" action="{action}"><select name="{name}" onchange="this.form.submit()"{disabled}>"#,
            action = escape(self.action),
            name = escape(self.name),
            disabled = if self.disabled { " disabled" } else { "" },
        );

        html.push_str(&format!(
            r#"<option value=""{}>{}</option>"#,
            if self.selected_option().is_none() { " selected" } else { "" },
            escape(self.placeholder)
        ));

        for option in &self.options {
            let selected = self.selected_id == Some(option.id.as_str());
            let text = match &option.sublabel {
                Some(sublabel) => format!("{} ({})", option.label, sublabel),
                None => option.label.clone(),
            };
            html.push_str(&format!(
                r#"<option value="{}"{}>{}</option>"#,
                escape(&option.id),
                if selected { " selected" } else { "" },
                escape(&text)
            ));
        }

        html.push_str("</select>");
        if !self.disabled {
            html.push_str(r#"<noscript><button type="submit">Select</button></noscript>"#);
        }
        html.push_str("</form>");

        if let Some(option) = self.selected_option() {
            html.push_str(r#"<div class="dropdown-selection">"#);
            html.push_str(&format!(
                r#"<div class="option-label">{}</div>"#,
                escape(&option.label)
            ));
            if let Some(sublabel) = &option.sublabel {
                html.push_str(&format!(
                    r#"<div class="option-sublabel">{}</div>"#,
                    escape(sublabel)
                ));
            }
            if let Some(status) = &option.status {
                html.push_str(&format!(
                    r#"<span class="{}">{}</span>"#,
                    status_tone(status),
                    escape(status)
                ));
            }
            html.push_str("</div>");
        }

        html
    }
}
