//! `docnav check` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_config::{CliSettings, Config};
use docnav_site::check_content;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long, env = "DOCNAV_CONFIG")]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Only validate the descriptor, do not look for content pages.
    #[arg(long)]
    skip_content: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor is invalid or links point to missing pages.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let theme = config.site.theme();
        output.success(&format!(
            "Descriptor is valid: {} sidebar group(s), {} link(s)",
            theme.sidebar().len(),
            theme.links().count()
        ));

        if self.skip_content {
            return Ok(());
        }

        let source_dir = &config.docs_resolved.source_dir;
        output.info(&format!("Source: {}", source_dir.display()));

        let report = check_content(&config.site, source_dir)?;

        for orphan in &report.orphans {
            output.warning(&format!(
                "Not linked from navigation: {}",
                orphan.display()
            ));
        }
        for broken in &report.broken {
            output.error(&format!(
                "{} -> {} (expected {})",
                broken.label,
                broken.link,
                broken.expected.display()
            ));
        }

        if !report.broken.is_empty() {
            return Err(CliError::BrokenLinks(report.broken.len()));
        }

        output.success("All navigation links point to existing pages");
        Ok(())
    }
}
