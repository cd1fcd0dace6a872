//! `docnav render` command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use docnav_config::Config;
use docnav_site::SiteMap;

use crate::error::CliError;
use crate::output::Output;

/// Site map output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Indented plain-text tree.
    #[default]
    Outline,
    /// HTML `<nav>` fragments.
    Html,
    /// JSON site map.
    Json,
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long, env = "DOCNAV_CONFIG")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Outline)]
    format: Format,
}

impl RenderArgs {
    /// Execute the render command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let site_map = SiteMap::new(&config.site);

        let rendered = match self.format {
            Format::Outline => site_map.render_outline(),
            Format::Html => site_map.render_html(),
            Format::Json => {
                let mut json = serde_json::to_string_pretty(&site_map)?;
                json.push('\n');
                json
            }
        };

        output.data(&rendered)?;
        Ok(())
    }
}
