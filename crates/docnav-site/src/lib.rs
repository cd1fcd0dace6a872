//! Site map rendering, content checks and export for docnav.
//!
//! This crate provides:
//! - [`SiteMap`]: the descriptor flattened into ordered, navigable entries
//! - [`check_content`]: build-time detection of links without a backing page
//! - [`DriftReport`]: comparison of several copies of a descriptor
//! - [`export`]: the JSON shape consumed by the site generator
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use docnav_config::Config;
//! use docnav_site::{SiteMap, check_content};
//!
//! let config = Config::load(None, None)?;
//! let site_map = SiteMap::new(&config.site);
//!
//! // Previous / next page for the doc footer
//! let neighbors = site_map.neighbors("/getting-started");
//!
//! let report = check_content(&config.site, &config.docs_resolved.source_dir)?;
//! assert!(report.broken.is_empty());
//! # Ok(())
//! # }
//! ```

mod content;
mod drift;
pub mod export;
mod html;
mod site_map;

pub use content::{BrokenLink, ContentError, ContentReport, check_content};
pub use drift::{DriftReport, GroupDrift, LabelDrift};
pub use site_map::{Neighbors, Section, SiteMap, SiteMapEntry};
