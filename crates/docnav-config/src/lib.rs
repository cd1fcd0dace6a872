//! Navigation descriptor and configuration loading for docnav.
//!
//! Parses `docnav.toml` with serde into the typed descriptor
//! ([`SiteConfig`]) and provides auto-discovery of the file in parent
//! directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## File layout
//!
//! ```toml
//! title = "BotFire"
//! description = "Modern PHP library for building Telegram bots"
//!
//! [docs]
//! source_dir = "docs"
//!
//! [[theme.nav]]
//! text = "Home"
//! link = "/"
//!
//! [[theme.sidebar]]
//! text = "Introduction"
//! items = [{ text = "Getting Started", link = "/getting-started" }]
//!
//! [[theme.social_links]]
//! icon = "github"
//! link = "https://github.com/botfire/botfire"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `title`
//! - `description`
//! - `docs.source_dir`

mod descriptor;
mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use descriptor::{LinkTarget, NavLink, SidebarGroup, SiteConfig, SocialLink, ThemeConfig};

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "docnav.toml";

/// Loaded configuration file.
#[derive(Debug)]
pub struct Config {
    /// Validated navigation descriptor (top-level keys of the file).
    pub site: SiteConfig,
    /// Resolved docs configuration.
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading from disk).
    pub config_path: Option<PathBuf>,
}

/// Configuration file as parsed from TOML.
///
/// Descriptor keys sit at the top level next to `[docs]`; any other key is
/// rejected.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    theme: ThemeConfig,
    /// Documentation configuration (paths are relative strings from TOML).
    #[serde(default)]
    docs: DocsConfigRaw,
}

impl ConfigFile {
    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.title = expand::expand_env(&self.title, "title")?;
        self.description = expand::expand_env(&self.description, "description")?;

        if let Some(ref source_dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(source_dir, "docs.source_dir")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_docs(&self, config_dir: &Path) -> DocsConfig {
        DocsConfig {
            source_dir: config_dir.join(self.docs.source_dir.as_deref().unwrap_or("docs")),
        }
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct DocsConfigRaw {
    source_dir: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Directory holding the markdown pages the links point to.
    pub source_dir: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML serialization error.
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no file exists, or an error if
    /// parsing or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir()?;
        let path = Self::locate(config_path, &cwd)?;

        let mut config = Self::load_from_file(&path)?;

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
    }

    /// Pick the explicit path, or discover one starting from `start`.
    fn locate(config_path: Option<&Path>, start: &Path) -> Result<PathBuf, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Ok(path.to_path_buf());
        }
        Self::discover_config(start).ok_or_else(|| ConfigError::NotFound(start.join(CONFIG_FILENAME)))
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            tracing::debug!(path = %candidate.display(), "Looking for config file");
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::parse(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());

        tracing::info!(
            path = %path.display(),
            title = %config.site.title(),
            groups = config.site.theme().sidebar().len(),
            links = config.site.theme().links().count(),
            "Loaded navigation descriptor"
        );

        Ok(config)
    }

    /// Read the descriptor of a config file as written.
    ///
    /// Entries are checked, cross-entry rules are not, and no environment
    /// variables are expanded. Used to compare copies that may disagree.
    pub fn load_descriptor_unchecked(path: &Path) -> Result<SiteConfig, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&content)?;
        Ok(SiteConfig::new_unchecked(
            file.title,
            file.description,
            file.theme,
        ))
    }

    /// Parse, expand, resolve and validate file content.
    fn parse(content: &str, config_dir: &Path) -> Result<Self, ConfigError> {
        let mut file: ConfigFile = toml::from_str(content)?;

        // Expand environment variables before path resolution
        file.expand_env_vars()?;
        let docs_resolved = file.resolve_docs(config_dir);

        let site = SiteConfig::new(file.title, file.description, file.theme)?;

        Ok(Self {
            site,
            docs_resolved,
            config_path: None,
        })
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.site.validate()
    }
}
