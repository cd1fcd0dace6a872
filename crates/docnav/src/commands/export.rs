//! `docnav export` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_config::Config;
use docnav_site::export;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long, env = "DOCNAV_CONFIG")]
    config: Option<PathBuf>,

    /// Write to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        let mut json = export::to_vitepress_string(&config.site)?;
        json.push('\n');

        match self.output {
            Some(path) => {
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&path, json)?;
                output.success(&format!("Exported to {}", path.display()));
            }
            None => output.data(&json)?,
        }

        Ok(())
    }
}
