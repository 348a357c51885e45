//! Server-rendered dashboard markup
//!
//! Components render to HTML strings; [`page::render_page`] composes them
//! from a selection snapshot.

mod breadcrumb;
mod dropdown;
mod page;
mod resource_card;

pub use breadcrumb::Breadcrumb;
pub use dropdown::{status_tone, Dropdown, DropdownOption};
pub use page::render_page;
pub use resource_card::ResourceCard;

/// Escape text for HTML element and attribute content
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape("web-frontend"), "web-frontend");
    }
}
