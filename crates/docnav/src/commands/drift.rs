//! `docnav drift` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_config::{Config, SiteConfig};
use docnav_site::DriftReport;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the drift command.
#[derive(Args)]
pub(crate) struct DriftArgs {
    /// Descriptor copies to compare.
    #[arg(required = true, num_args = 2..)]
    files: Vec<PathBuf>,
}

impl DriftArgs {
    /// Execute the drift command.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Drift` if the copies disagree.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let mut copies = Vec::with_capacity(self.files.len());
        for path in &self.files {
            // Copies are compared as written, even if one contradicts itself
            let site = Config::load_descriptor_unchecked(path)?;
            tracing::debug!(
                path = %path.display(),
                links = site.theme().links().count(),
                "Loaded descriptor copy"
            );
            copies.push((path.display().to_string(), site));
        }
        let named: Vec<(&str, &SiteConfig)> = copies
            .iter()
            .map(|(name, site)| (name.as_str(), site))
            .collect();

        let report = DriftReport::compare(&named);

        if report.is_empty() {
            output.success("Descriptor copies agree");
            return Ok(());
        }

        for drift in &report.label_drift {
            output.highlight(&format!("Label '{}' has different links:", drift.label));
            for (copy, link) in &drift.links {
                output.info(&format!("  {copy}: {link}"));
            }
        }
        for drift in &report.group_drift {
            output.warning(&format!(
                "Group '{}' only in: {}",
                drift.heading,
                drift.present_in.join(", ")
            ));
        }

        Err(CliError::Drift(report.len()))
    }
}
