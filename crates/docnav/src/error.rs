//! CLI error types.

use docnav_config::ConfigError;
use docnav_site::ContentError;
use docnav_site::export::ExportError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Content(#[from] ContentError),

    #[error("{0}")]
    Export(#[from] ExportError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} navigation link(s) point to missing pages")]
    BrokenLinks(usize),

    #[error("{0} difference(s) between descriptor copies")]
    Drift(usize),
}
