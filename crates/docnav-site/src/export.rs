//! Export of the descriptor in the site generator's config shape.
//!
//! The generator reads `{ title, description, themeConfig: { nav, sidebar,
//! socialLinks } }` with camelCase keys.

use docnav_config::{NavLink, SidebarGroup, SiteConfig, SocialLink};
use serde::Serialize;

/// Export error.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeneratorConfig<'a> {
    title: &'a str,
    description: &'a str,
    theme_config: GeneratorTheme<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeneratorTheme<'a> {
    nav: &'a [NavLink],
    sidebar: &'a [SidebarGroup],
    social_links: &'a [SocialLink],
}

impl<'a> From<&'a SiteConfig> for GeneratorConfig<'a> {
    fn from(site: &'a SiteConfig) -> Self {
        Self {
            title: site.title(),
            description: site.description(),
            theme_config: GeneratorTheme {
                nav: site.theme().nav(),
                sidebar: site.theme().sidebar(),
                social_links: site.theme().social_links(),
            },
        }
    }
}

/// Descriptor as a JSON value in the generator's shape.
pub fn vitepress_json(site: &SiteConfig) -> Result<serde_json::Value, ExportError> {
    Ok(serde_json::to_value(GeneratorConfig::from(site))?)
}

/// Descriptor as pretty-printed JSON in the generator's shape.
pub fn to_vitepress_string(site: &SiteConfig) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&GeneratorConfig::from(site))?)
}
