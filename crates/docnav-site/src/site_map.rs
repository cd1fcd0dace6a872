//! Navigable site map built from a descriptor.

use std::fmt::Write;

use docnav_config::{NavLink, SiteConfig};
use serde::Serialize;

/// One link in the site map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SiteMapEntry {
    /// Sidebar heading the entry sits under, `None` for nav bar and social links.
    #[serde(skip)]
    pub section: Option<String>,
    /// Display label (icon identifier for social links).
    pub text: String,
    /// Link target as written in the descriptor.
    pub link: String,
    /// True if the link leaves the documentation site.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub external: bool,
}

impl SiteMapEntry {
    fn from_link(link: &NavLink, section: Option<&str>) -> Self {
        Self {
            section: section.map(str::to_owned),
            text: link.text().to_owned(),
            link: link.link().as_str().to_owned(),
            external: link.link().is_external(),
        }
    }
}

/// Sidebar section: a heading and its links in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Section {
    pub heading: String,
    pub entries: Vec<SiteMapEntry>,
}

/// Previous and next pages in sidebar reading order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Neighbors<'a> {
    pub prev: Option<&'a SiteMapEntry>,
    pub next: Option<&'a SiteMapEntry>,
}

/// The descriptor flattened into ordered, navigable entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SiteMap {
    title: String,
    nav: Vec<SiteMapEntry>,
    sections: Vec<Section>,
    social_links: Vec<SiteMapEntry>,
}

impl SiteMap {
    /// Build the site map. Order of nav links, groups and items is preserved.
    #[must_use]
    pub fn new(site: &SiteConfig) -> Self {
        let theme = site.theme();
        let nav = theme
            .nav()
            .iter()
            .map(|link| SiteMapEntry::from_link(link, None))
            .collect();
        let sections = theme
            .sidebar()
            .iter()
            .map(|group| Section {
                heading: group.text().to_owned(),
                entries: group
                    .items()
                    .iter()
                    .map(|link| SiteMapEntry::from_link(link, Some(group.text())))
                    .collect(),
            })
            .collect();
        let social_links = theme
            .social_links()
            .iter()
            .map(|social| SiteMapEntry {
                section: None,
                text: social.icon().to_owned(),
                link: social.link().as_str().to_owned(),
                external: true,
            })
            .collect();

        Self {
            title: site.title().to_owned(),
            nav,
            sections,
            social_links,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn nav(&self) -> &[SiteMapEntry] {
        &self.nav
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn social_links(&self) -> &[SiteMapEntry] {
        &self.social_links
    }

    /// Nav bar entries followed by sidebar entries.
    pub fn entries(&self) -> impl Iterator<Item = &SiteMapEntry> {
        self.nav.iter().chain(self.sidebar_entries())
    }

    fn sidebar_entries(&self) -> impl Iterator<Item = &SiteMapEntry> {
        self.sections.iter().flat_map(|section| section.entries.iter())
    }

    /// First entry pointing at `link`.
    #[must_use]
    pub fn find(&self, link: &str) -> Option<&SiteMapEntry> {
        self.entries().find(|entry| entry.link == link)
    }

    /// Previous and next internal pages around `link` in the sidebar.
    ///
    /// Pages that only appear in the nav bar have no neighbors.
    #[must_use]
    pub fn neighbors(&self, link: &str) -> Neighbors<'_> {
        let pages: Vec<&SiteMapEntry> = self
            .sidebar_entries()
            .filter(|entry| !entry.external)
            .collect();
        let Some(pos) = pages.iter().position(|entry| entry.link == link) else {
            return Neighbors::default();
        };
        Neighbors {
            prev: pos.checked_sub(1).map(|i| pages[i]),
            next: pages.get(pos + 1).copied(),
        }
    }

    /// Render as HTML `<nav>` fragments.
    #[must_use]
    pub fn render_html(&self) -> String {
        crate::html::render(self)
    }

    /// Render as an indented plain-text tree.
    #[must_use]
    pub fn render_outline(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        if !self.nav.is_empty() {
            out.push_str("  Nav\n");
            for entry in &self.nav {
                let _ = writeln!(out, "    {} -> {}", entry.text, entry.link);
            }
        }
        for section in &self.sections {
            let _ = writeln!(out, "  {}", section.heading);
            for entry in &section.entries {
                let _ = writeln!(out, "    {} -> {}", entry.text, entry.link);
            }
        }
        if !self.social_links.is_empty() {
            out.push_str("  Social\n");
            for entry in &self.social_links {
                let _ = writeln!(out, "    {} -> {}", entry.text, entry.link);
            }
        }
        out
    }
}
