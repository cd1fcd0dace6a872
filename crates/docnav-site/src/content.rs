//! Detection of links without a backing content page.
//!
//! Page resolution follows the generator's file-based routing:
//! - `/` → `index.md`
//! - `/guide/` → `guide/index.md`
//! - `/guide` → `guide.md`, then `guide/index.md`

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use docnav_config::SiteConfig;

/// Content check error.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Source directory does not exist.
    #[error("Source directory not found: {}", .0.display())]
    SourceDirMissing(PathBuf),
    /// I/O error while scanning.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A link whose page does not exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrokenLink {
    /// Label of the entry.
    pub label: String,
    /// Link as written in the descriptor.
    pub link: String,
    /// Primary file the link should resolve to, relative to the source directory.
    pub expected: PathBuf,
}

/// Outcome of [`check_content`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentReport {
    /// Links without a page, in declaration order.
    pub broken: Vec<BrokenLink>,
    /// Markdown pages no link points to, relative to the source directory, sorted.
    pub orphans: Vec<PathBuf>,
}

impl ContentReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.broken.is_empty() && self.orphans.is_empty()
    }
}

/// Check every internal link of `site` against the pages under `source_dir`.
///
/// External links are not checked.
pub fn check_content(site: &SiteConfig, source_dir: &Path) -> Result<ContentReport, ContentError> {
    if !source_dir.is_dir() {
        return Err(ContentError::SourceDirMissing(source_dir.to_path_buf()));
    }

    let mut report = ContentReport::default();
    let mut referenced = HashSet::new();

    for nav_link in site.theme().links() {
        let Some(path) = nav_link.link().content_path() else {
            continue;
        };
        let candidates = candidate_files(path);
        match candidates
            .iter()
            .find(|candidate| source_dir.join(candidate).is_file())
        {
            Some(found) => {
                referenced.insert(found.clone());
            }
            None => {
                tracing::debug!(link = %nav_link.link(), "No page for link");
                report.broken.push(BrokenLink {
                    label: nav_link.text().to_owned(),
                    link: nav_link.link().as_str().to_owned(),
                    expected: candidates[0].clone(),
                });
            }
        }
    }

    let mut pages = Vec::new();
    scan_pages(source_dir, Path::new(""), &mut pages)?;
    tracing::debug!(page_count = pages.len(), "Content scan completed");

    report.orphans = pages
        .into_iter()
        .filter(|page| !referenced.contains(page))
        .collect();
    report.orphans.sort();

    for orphan in &report.orphans {
        tracing::warn!(page = %orphan.display(), "Page is not linked from navigation");
    }

    Ok(report)
}

/// Files that may back an internal path, most specific first.
fn candidate_files(path: &str) -> Vec<PathBuf> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return vec![PathBuf::from("index.md")];
    }
    if path.ends_with('/') {
        return vec![Path::new(trimmed).join("index.md")];
    }
    vec![
        PathBuf::from(format!("{trimmed}.md")),
        Path::new(trimmed).join("index.md"),
    ]
}

/// Collect markdown files under `dir`, relative to the source root.
///
/// Hidden entries are skipped, including the generator's `.vitepress` directory.
fn scan_pages(dir: &Path, prefix: &Path, pages: &mut Vec<PathBuf>) -> Result<(), ContentError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }
        let relative = prefix.join(&name);
        if entry.file_type()?.is_dir() {
            scan_pages(&entry.path(), &relative, pages)?;
        } else if Path::new(&name).extension().is_some_and(|ext| ext == "md") {
            pages.push(relative);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docnav_config::{NavLink, SidebarGroup, ThemeConfig};
    use pretty_assertions::assert_eq;

    fn link(text: &str, path: &str) -> NavLink {
        NavLink::new(text, path).unwrap()
    }

    fn site() -> SiteConfig {
        SiteConfig::new(
            "BotFire",
            "",
            ThemeConfig::new(
                vec![link("Home", "/")],
                vec![
                    SidebarGroup::new(
                        "Introduction",
                        vec![
                            link("Getting Started", "/getting-started"),
                            link("Send Methods", "/send-methods/"),
                        ],
                    )
                    .unwrap(),
                    SidebarGroup::new(
                        "Send Methods",
                        vec![
                            link("Send Audio", "/send-methods/send-audio"),
                            link("Send Voice", "/send-methods/send-voice#usage"),
                            link("Bot API", "https://core.telegram.org/bots/api"),
                        ],
                    )
                    .unwrap(),
                ],
                Vec::new(),
            )
            .unwrap(),
        )
        .unwrap()
    }

    fn write(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "# Page\n").unwrap();
    }

    #[test]
    fn test_candidate_files() {
        assert_eq!(candidate_files("/"), vec![PathBuf::from("index.md")]);
        assert_eq!(
            candidate_files("/send-methods/"),
            vec![PathBuf::from("send-methods/index.md")]
        );
        assert_eq!(
            candidate_files("/send-methods/send-audio"),
            vec![
                PathBuf::from("send-methods/send-audio.md"),
                PathBuf::from("send-methods/send-audio/index.md"),
            ]
        );
    }

    #[test]
    fn test_all_links_backed() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "index.md");
        write(dir.path(), "getting-started.md");
        write(dir.path(), "send-methods/index.md");
        write(dir.path(), "send-methods/send-audio/index.md");
        write(dir.path(), "send-methods/send-voice.md");

        let report = check_content(&site(), dir.path()).unwrap();

        assert!(report.is_clean(), "{report:?}");
    }

    #[test]
    fn test_broken_links_and_orphans() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "index.md");
        write(dir.path(), "getting-started.md");
        write(dir.path(), "send-methods/index.md");
        write(dir.path(), "input-methods/send-audio.md");
        write(dir.path(), ".vitepress/theme/notes.md");
        fs::write(dir.path().join("logo.png"), b"png").unwrap();

        let report = check_content(&site(), dir.path()).unwrap();

        assert_eq!(
            report.broken,
            vec![
                BrokenLink {
                    label: "Send Audio".to_owned(),
                    link: "/send-methods/send-audio".to_owned(),
                    expected: PathBuf::from("send-methods/send-audio.md"),
                },
                BrokenLink {
                    label: "Send Voice".to_owned(),
                    link: "/send-methods/send-voice#usage".to_owned(),
                    expected: PathBuf::from("send-methods/send-voice.md"),
                },
            ]
        );
        assert_eq!(
            report.orphans,
            vec![PathBuf::from("input-methods/send-audio.md")]
        );
    }

    #[test]
    fn test_missing_source_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("docs");
        let err = check_content(&site(), &missing).unwrap_err();
        assert!(matches!(err, ContentError::SourceDirMissing(p) if p == missing));
    }
}
