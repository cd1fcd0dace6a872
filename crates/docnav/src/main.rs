//! docnav CLI - documentation site navigation.
//!
//! Provides commands for:
//! - `check`: Validate the descriptor and find links without pages
//! - `render`: Print the site map as an outline, HTML or JSON
//! - `export`: Write the descriptor in the site generator's JSON shape
//! - `drift`: Compare several copies of a descriptor

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, DriftArgs, ExportArgs, RenderArgs};
use output::Output;

/// docnav - documentation site navigation.
#[derive(Parser)]
#[command(name = "docnav", version, about)]
struct Cli {
    /// Enable verbose output (INFO logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the descriptor and check that every link has a page.
    Check(CheckArgs),
    /// Print the site map.
    Render(RenderArgs),
    /// Export the descriptor for the site generator.
    Export(ExportArgs),
    /// Compare descriptor copies and report drift.
    Drift(DriftArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Render(args) => args.execute(),
        Commands::Export(args) => args.execute(),
        Commands::Drift(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_format() {
        let cli = Cli::try_parse_from(["docnav", "render", "--format", "html", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Render(_)));
    }

    #[test]
    fn test_drift_requires_two_files() {
        assert!(Cli::try_parse_from(["docnav", "drift", "a.toml"]).is_err());
        assert!(Cli::try_parse_from(["docnav", "drift", "a.toml", "b.toml"]).is_ok());
    }
}
