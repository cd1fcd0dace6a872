//! HTML rendering of a [`SiteMap`].

use std::fmt::Write;

use crate::site_map::{SiteMap, SiteMapEntry};

/// Render the nav bar, sidebar and social links as HTML fragments.
pub(crate) fn render(site_map: &SiteMap) -> String {
    let mut html = String::with_capacity(2048);

    if !site_map.nav().is_empty() {
        html.push_str("<nav class=\"nav\">\n");
        for entry in site_map.nav() {
            html.push_str("  ");
            push_link(&mut html, entry);
            html.push('\n');
        }
        html.push_str("</nav>\n");
    }

    if !site_map.sections().is_empty() {
        html.push_str("<nav class=\"sidebar\">\n");
        for section in site_map.sections() {
            html.push_str("  <section>\n");
            let _ = writeln!(html, "    <h2>{}</h2>", escape_html(&section.heading));
            html.push_str("    <ul>\n");
            for entry in &section.entries {
                html.push_str("      <li>");
                push_link(&mut html, entry);
                html.push_str("</li>\n");
            }
            html.push_str("    </ul>\n");
            html.push_str("  </section>\n");
        }
        html.push_str("</nav>\n");
    }

    if !site_map.social_links().is_empty() {
        html.push_str("<nav class=\"social-links\">\n");
        for entry in site_map.social_links() {
            html.push_str("  ");
            push_link(&mut html, entry);
            html.push('\n');
        }
        html.push_str("</nav>\n");
    }

    html
}

fn push_link(html: &mut String, entry: &SiteMapEntry) {
    let href = escape_html(&entry.link);
    let label = escape_html(&entry.text);
    if entry.external {
        let _ = write!(
            html,
            r#"<a href="{href}" target="_blank" rel="noreferrer">{label}</a>"#
        );
    } else {
        let _ = write!(html, r#"<a href="{href}">{label}</a>"#);
    }
}

/// Escape HTML special characters.
pub(crate) fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Q&A's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Q&amp;A&#x27;s&lt;/a&gt;"
        );
    }
}
