//! Navigation descriptor types.
//!
//! Leaf entries ([`LinkTarget`], [`NavLink`], [`SidebarGroup`], [`SocialLink`])
//! validate themselves on construction, and deserialization goes through the
//! same constructors. A parsed tree therefore never holds an empty label or a
//! malformed link. Rules spanning several entries are checked by
//! [`ThemeConfig::validate`] and [`SiteConfig::validate`].

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Target of a navigation entry.
///
/// Either an internal path starting with `/` (e.g. `/getting-started`) or an
/// absolute `http://` / `https://` URL.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LinkTarget(String);

impl LinkTarget {
    /// Create a link target, rejecting empty or malformed values.
    pub fn new(link: impl Into<String>) -> Result<Self, ConfigError> {
        let link = link.into();
        check_link(&link).map_err(ConfigError::Validation)?;
        Ok(Self(link))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the link points outside the documentation site.
    #[must_use]
    pub fn is_external(&self) -> bool {
        !self.0.starts_with('/')
    }

    /// Internal page path with fragment, query and `.md`/`.html` suffix removed.
    ///
    /// Returns `None` for external links.
    #[must_use]
    pub fn content_path(&self) -> Option<&str> {
        if self.is_external() {
            return None;
        }
        let end = self.0.find(['#', '?']).unwrap_or(self.0.len());
        let path = &self.0[..end];
        Some(
            path.strip_suffix(".md")
                .or_else(|| path.strip_suffix(".html"))
                .unwrap_or(path),
        )
    }
}

impl TryFrom<String> for LinkTarget {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LinkTarget> for String {
    fn from(link: LinkTarget) -> Self {
        link.0
    }
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn check_link(link: &str) -> Result<(), String> {
    if link.trim().is_empty() {
        return Err("link cannot be empty".to_owned());
    }
    if link.chars().any(char::is_whitespace) {
        return Err(format!("link '{link}' contains whitespace"));
    }
    if let Some(rest) = link.strip_prefix('/') {
        if rest.starts_with('/') {
            return Err(format!("link '{link}' must not start with '//'"));
        }
        if rest.split('/').any(|segment| segment == "..") {
            return Err(format!("link '{link}' must not contain '..' segments"));
        }
        return Ok(());
    }
    match external_host(link) {
        Some("") => Err(format!("link '{link}' has no host")),
        Some(_) => Ok(()),
        None => Err(format!(
            "link '{link}' must start with '/', http:// or https://"
        )),
    }
}

/// Host part of an `http(s)` URL, `None` for any other scheme.
fn external_host(link: &str) -> Option<&str> {
    let rest = link
        .strip_prefix("https://")
        .or_else(|| link.strip_prefix("http://"))?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(&rest[..end])
}

fn require_label(value: &str, what: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{what} cannot be empty")));
    }
    Ok(())
}

/// A single label-to-path mapping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNavLink")]
pub struct NavLink {
    text: String,
    link: LinkTarget,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNavLink {
    text: String,
    link: String,
}

impl NavLink {
    /// Create a navigation link.
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Result<Self, ConfigError> {
        let text = text.into();
        require_label(&text, "link text")?;
        let link = link.into();
        check_link(&link).map_err(|msg| ConfigError::Validation(format!("'{text}': {msg}")))?;
        Ok(Self {
            text,
            link: LinkTarget(link),
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn link(&self) -> &LinkTarget {
        &self.link
    }
}

impl TryFrom<RawNavLink> for NavLink {
    type Error = ConfigError;

    fn try_from(raw: RawNavLink) -> Result<Self, Self::Error> {
        Self::new(raw.text, raw.link)
    }
}

/// Labeled, ordered collection of links rendered as one sidebar section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSidebarGroup")]
pub struct SidebarGroup {
    text: String,
    items: Vec<NavLink>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSidebarGroup {
    text: String,
    #[serde(default)]
    items: Vec<NavLink>,
}

impl SidebarGroup {
    /// Create a sidebar group. Item order is kept as given.
    pub fn new(text: impl Into<String>, items: Vec<NavLink>) -> Result<Self, ConfigError> {
        let text = text.into();
        require_label(&text, "sidebar group text")?;
        if items.is_empty() {
            return Err(ConfigError::Validation(format!(
                "sidebar group '{text}' has no items"
            )));
        }
        Ok(Self { text, items })
    }

    /// Group heading.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn items(&self) -> &[NavLink] {
        &self.items
    }
}

impl TryFrom<RawSidebarGroup> for SidebarGroup {
    type Error = ConfigError;

    fn try_from(raw: RawSidebarGroup) -> Result<Self, Self::Error> {
        Self::new(raw.text, raw.items)
    }
}

/// Icon link to an external profile (e.g. the project's GitHub repository).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSocialLink")]
pub struct SocialLink {
    icon: String,
    link: LinkTarget,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSocialLink {
    icon: String,
    link: String,
}

impl SocialLink {
    /// Create a social link. The icon is a lowercase identifier such as `github`.
    pub fn new(icon: impl Into<String>, link: impl Into<String>) -> Result<Self, ConfigError> {
        let icon = icon.into();
        require_label(&icon, "social link icon")?;
        if !icon
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ConfigError::Validation(format!(
                "social link icon '{icon}' must contain only lowercase letters, digits and '-'"
            )));
        }
        let link = LinkTarget::new(link)
            .map_err(|e| ConfigError::Validation(format!("social link '{icon}': {e}")))?;
        if !link.is_external() {
            return Err(ConfigError::Validation(format!(
                "social link '{icon}' must be an http:// or https:// URL"
            )));
        }
        Ok(Self { icon, link })
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    #[must_use]
    pub fn link(&self) -> &LinkTarget {
        &self.link
    }
}

impl TryFrom<RawSocialLink> for SocialLink {
    type Error = ConfigError;

    fn try_from(raw: RawSocialLink) -> Result<Self, Self::Error> {
        Self::new(raw.icon, raw.link)
    }
}

/// Navigation tree handed to the site generator's theme.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    nav: Vec<NavLink>,
    sidebar: Vec<SidebarGroup>,
    #[serde(alias = "socialLinks")]
    social_links: Vec<SocialLink>,
}

impl ThemeConfig {
    /// Assemble and validate a navigation tree.
    pub fn new(
        nav: Vec<NavLink>,
        sidebar: Vec<SidebarGroup>,
        social_links: Vec<SocialLink>,
    ) -> Result<Self, ConfigError> {
        let theme = Self {
            nav,
            sidebar,
            social_links,
        };
        theme.validate()?;
        Ok(theme)
    }

    /// Top navigation bar.
    #[must_use]
    pub fn nav(&self) -> &[NavLink] {
        &self.nav
    }

    /// Sidebar groups, rendered top to bottom.
    #[must_use]
    pub fn sidebar(&self) -> &[SidebarGroup] {
        &self.sidebar
    }

    /// Icon links shown in the header.
    #[must_use]
    pub fn social_links(&self) -> &[SocialLink] {
        &self.social_links
    }

    /// Every navigation link: nav bar first, then sidebar items, in declaration order.
    pub fn links(&self) -> impl Iterator<Item = &NavLink> {
        self.nav
            .iter()
            .chain(self.sidebar.iter().flat_map(|group| group.items.iter()))
    }

    /// Check rules that span several entries.
    ///
    /// Sidebar headings must be unique, and a label must resolve to the same
    /// link wherever it appears.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut headings = HashSet::new();
        for group in &self.sidebar {
            if !headings.insert(group.text()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate sidebar group '{}'",
                    group.text()
                )));
            }
        }

        let mut canonical: HashMap<&str, &LinkTarget> = HashMap::new();
        for link in self.links() {
            match canonical.entry(link.text()) {
                Entry::Vacant(entry) => {
                    entry.insert(link.link());
                }
                Entry::Occupied(entry) if *entry.get() != link.link() => {
                    return Err(ConfigError::Validation(format!(
                        "label '{}' points to both '{}' and '{}'",
                        link.text(),
                        entry.get(),
                        link.link()
                    )));
                }
                Entry::Occupied(_) => {}
            }
        }

        Ok(())
    }
}

/// Site navigation descriptor.
///
/// Immutable once built: fields are only reachable through accessors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    theme: ThemeConfig,
}

impl SiteConfig {
    /// Assemble and validate a descriptor.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        theme: ThemeConfig,
    ) -> Result<Self, ConfigError> {
        let site = Self::new_unchecked(title.into(), description.into(), theme);
        site.validate()?;
        Ok(site)
    }

    /// Assemble a descriptor without cross-entry checks.
    pub(crate) fn new_unchecked(title: String, description: String, theme: ThemeConfig) -> Self {
        Self {
            title,
            description,
            theme,
        }
    }

    /// Parse and validate a descriptor from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let site = Self::from_toml_str_unchecked(content)?;
        site.validate()?;
        Ok(site)
    }

    /// Parse a descriptor, checking entries but not cross-entry rules.
    ///
    /// Used to inspect copies that may disagree with themselves.
    pub fn from_toml_str_unchecked(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize the descriptor back to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Site title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Site description (HTML meta description).
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Navigation tree.
    #[must_use]
    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_label(&self.title, "title")?;
        self.theme.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn link(text: &str, path: &str) -> NavLink {
        NavLink::new(text, path).unwrap()
    }

    fn send_methods() -> SidebarGroup {
        SidebarGroup::new(
            "Send Methods",
            vec![
                link("Send Message", "/send-methods/send-message"),
                link("Send Photo", "/send-methods/send-photo"),
            ],
        )
        .unwrap()
    }

    fn assert_validation_error(result: Result<impl fmt::Debug, ConfigError>, expected: &[&str]) {
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected {
            assert!(msg.contains(s), "Expected error to contain '{s}', got: {msg}");
        }
    }

    #[test]
    fn test_link_target_internal() {
        let target = LinkTarget::new("/getting-started").unwrap();
        assert!(!target.is_external());
        assert_eq!(target.as_str(), "/getting-started");
    }

    #[test]
    fn test_link_target_external() {
        let target = LinkTarget::new("https://github.com/botfire/botfire").unwrap();
        assert!(target.is_external());
        assert_eq!(target.content_path(), None);
    }

    #[test]
    fn test_link_target_rejects_malformed() {
        assert_validation_error(LinkTarget::new(""), &["empty"]);
        assert_validation_error(LinkTarget::new("   "), &["empty"]);
        assert_validation_error(LinkTarget::new("send-message"), &["must start with"]);
        assert_validation_error(LinkTarget::new("/send message"), &["whitespace"]);
        assert_validation_error(LinkTarget::new("//cdn.example.com"), &["//"]);
        assert_validation_error(LinkTarget::new("/docs/../secret"), &[".."]);
        assert_validation_error(LinkTarget::new("https://"), &["no host"]);
        assert_validation_error(LinkTarget::new("ftp://example.com"), &["http"]);
    }

    #[test]
    fn test_content_path_strips_suffixes() {
        let cases = [
            ("/", "/"),
            ("/getting-started", "/getting-started"),
            ("/getting-started.md", "/getting-started"),
            ("/getting-started.html#install", "/getting-started"),
            ("/send-methods/?tab=1", "/send-methods/"),
        ];
        for (input, expected) in cases {
            let target = LinkTarget::new(input).unwrap();
            assert_eq!(target.content_path(), Some(expected), "input: {input}");
        }
    }

    #[test]
    fn test_nav_link_rejects_empty_text() {
        assert_validation_error(NavLink::new(" ", "/home"), &["link text", "empty"]);
    }

    #[test]
    fn test_nav_link_error_names_label() {
        assert_validation_error(NavLink::new("Send Audio", "send-audio"), &["Send Audio"]);
    }

    #[test]
    fn test_sidebar_group_requires_items() {
        assert_validation_error(SidebarGroup::new("Helpers", Vec::new()), &["Helpers", "no items"]);
    }

    #[test]
    fn test_sidebar_group_preserves_order() {
        let group = send_methods();
        let texts: Vec<_> = group.items().iter().map(NavLink::text).collect();
        assert_eq!(texts, vec!["Send Message", "Send Photo"]);
    }

    #[test]
    fn test_social_link_validation() {
        assert!(SocialLink::new("github", "https://github.com/botfire/botfire").is_ok());
        assert_validation_error(SocialLink::new("GitHub", "https://github.com"), &["lowercase"]);
        assert_validation_error(SocialLink::new("github", "/github"), &["http"]);
        assert_validation_error(SocialLink::new("", "https://github.com"), &["icon", "empty"]);
    }

    #[test]
    fn test_theme_rejects_duplicate_group() {
        assert_validation_error(
            ThemeConfig::new(Vec::new(), vec![send_methods(), send_methods()], Vec::new()),
            &["duplicate", "Send Methods"],
        );
    }

    #[test]
    fn test_theme_rejects_label_with_two_paths() {
        let sidebar = vec![
            SidebarGroup::new("Send Methods", vec![link("Send Audio", "/send-methods/send-audio")])
                .unwrap(),
            SidebarGroup::new("Input Methods", vec![link("Send Audio", "/input-methods/send-audio")])
                .unwrap(),
        ];
        assert_validation_error(
            ThemeConfig::new(Vec::new(), sidebar, Vec::new()),
            &["Send Audio", "/send-methods/send-audio", "/input-methods/send-audio"],
        );
    }

    #[test]
    fn test_theme_allows_repeated_label_with_same_path() {
        let theme = ThemeConfig {
            nav: vec![link("Getting Started", "/getting-started")],
            sidebar: vec![
                SidebarGroup::new("Introduction", vec![link("Getting Started", "/getting-started")])
                    .unwrap(),
            ],
            ..ThemeConfig::default()
        };
        assert!(theme.validate().is_ok());
    }

    #[test]
    fn test_links_order() {
        let theme = ThemeConfig {
            nav: vec![link("Home", "/")],
            sidebar: vec![send_methods()],
            ..ThemeConfig::default()
        };
        let texts: Vec<_> = theme.links().map(NavLink::text).collect();
        assert_eq!(texts, vec!["Home", "Send Message", "Send Photo"]);
    }

    #[test]
    fn test_site_config_requires_title() {
        assert_validation_error(SiteConfig::new("", "", ThemeConfig::default()), &["title"]);
    }

    #[test]
    fn test_parse_descriptor() {
        let toml = r#"
title = "BotFire"
description = "Telegram bots in PHP"

[[theme.nav]]
text = "Home"
link = "/"

[[theme.sidebar]]
text = "Send Methods"
items = [
    { text = "Send Message", link = "/send-methods/send-message" },
    { text = "Send Photo", link = "/send-methods/send-photo" },
]

[[theme.socialLinks]]
icon = "github"
link = "https://github.com/botfire/botfire"
"#;
        let site = SiteConfig::from_toml_str(toml).unwrap();
        assert_eq!(site.title(), "BotFire");
        assert_eq!(site.theme().nav().to_vec(), vec![link("Home", "/")]);
        assert_eq!(site.theme().sidebar().to_vec(), vec![send_methods()]);
        assert_eq!(site.theme().social_links().len(), 1);
        assert_eq!(site.theme().social_links()[0].icon(), "github");
    }

    fn assert_unknown_field(toml: &str, field: &str) {
        let err = SiteConfig::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
        let msg = err.to_string();
        assert!(
            msg.contains("unknown field") && msg.contains(field),
            "Expected unknown field '{field}', got: {msg}"
        );
    }

    #[test]
    fn test_parse_rejects_misspelled_theme_key() {
        assert_unknown_field(
            r#"
title = "BotFire"

[[theme.sidebars]]
text = "Send Methods"
items = [{ text = "Send Message", link = "/send-methods/send-message" }]
"#,
            "sidebars",
        );
        assert_unknown_field(
            r#"
title = "BotFire"

[[theme.socialLink]]
icon = "github"
link = "https://github.com/botfire/botfire"
"#,
            "socialLink",
        );
    }

    #[test]
    fn test_parse_rejects_misspelled_top_level_key() {
        assert_unknown_field("title = \"BotFire\"\ndescripton = \"typo\"\n", "descripton");
    }

    #[test]
    fn test_parse_rejects_misspelled_entry_key() {
        assert_unknown_field(
            r#"
title = "BotFire"

[[theme.sidebar]]
text = "Send Methods"
items = [{ text = "Send Message", href = "/send-methods/send-message" }]
"#,
            "href",
        );
        assert_unknown_field(
            r#"
title = "BotFire"

[[theme.sidebar]]
txt = "Send Methods"
items = [{ text = "Send Message", link = "/send-methods/send-message" }]
"#,
            "txt",
        );
    }

    #[test]
    fn test_parse_rejects_malformed_entry() {
        let toml = r#"
title = "BotFire"

[[theme.sidebar]]
text = "Send Methods"
items = [{ text = "Send Audio", link = "" }]
"#;
        let err = SiteConfig::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
        assert!(err.to_string().contains("Send Audio"));
    }

    #[test]
    fn test_unchecked_parse_keeps_inconsistent_copy() {
        let toml = r#"
title = "BotFire"

[[theme.sidebar]]
text = "Send Methods"
items = [{ text = "Send Audio", link = "/send-methods/send-audio" }]

[[theme.sidebar]]
text = "Input Methods"
items = [{ text = "Send Audio", link = "/input-methods/send-audio" }]
"#;
        assert!(SiteConfig::from_toml_str(toml).is_err());
        let site = SiteConfig::from_toml_str_unchecked(toml).unwrap();
        assert_eq!(site.theme().sidebar().len(), 2);
    }

    #[test]
    fn test_toml_round_trip() {
        let site = SiteConfig::new(
            "BotFire",
            "Modern PHP library",
            ThemeConfig {
                nav: vec![link("Home", "/")],
                sidebar: vec![
                    SidebarGroup::new("Introduction", vec![link("Getting Started", "/getting-started")])
                        .unwrap(),
                    send_methods(),
                ],
                social_links: vec![
                    SocialLink::new("github", "https://github.com/botfire/botfire").unwrap(),
                ],
            },
        )
        .unwrap();

        let serialized = site.to_toml_string().unwrap();
        let parsed = SiteConfig::from_toml_str(&serialized).unwrap();

        assert_eq!(parsed, site);
    }
}
