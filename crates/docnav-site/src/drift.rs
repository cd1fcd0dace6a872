//! Comparison of several copies of a descriptor.
//!
//! Copies kept in different places tend to drift: the same label starts
//! pointing to different pages, or a group is renamed in one copy only.

use std::collections::HashMap;

use docnav_config::SiteConfig;
use serde::Serialize;

/// A label whose link differs between (or within) copies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LabelDrift {
    pub label: String,
    /// Every `(copy, link)` occurrence, in input order.
    pub links: Vec<(String, String)>,
}

/// A sidebar heading missing from some copies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupDrift {
    pub heading: String,
    /// Copies that contain the heading, in input order.
    pub present_in: Vec<String>,
}

/// Differences between descriptor copies.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DriftReport {
    pub label_drift: Vec<LabelDrift>,
    pub group_drift: Vec<GroupDrift>,
}

/// Insertion-ordered grouping of values by key.
struct Ordered<V> {
    index: HashMap<String, usize>,
    items: Vec<(String, Vec<V>)>,
}

impl<V> Ordered<V> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            items: Vec::new(),
        }
    }

    fn push(&mut self, key: &str, value: V) {
        let pos = *self.index.entry(key.to_owned()).or_insert_with(|| {
            self.items.push((key.to_owned(), Vec::new()));
            self.items.len() - 1
        });
        self.items[pos].1.push(value);
    }
}

impl DriftReport {
    /// Compare named copies. Labels and headings are reported in first-seen order.
    #[must_use]
    pub fn compare(copies: &[(&str, &SiteConfig)]) -> Self {
        let mut labels = Ordered::new();
        let mut headings = Ordered::new();

        for (name, site) in copies {
            for link in site.theme().links() {
                labels.push(link.text(), ((*name).to_owned(), link.link().as_str().to_owned()));
            }
            for group in site.theme().sidebar() {
                headings.push(group.text(), (*name).to_owned());
            }
        }

        let label_drift = labels
            .items
            .into_iter()
            .filter(|(_, links)| links.iter().any(|(_, link)| *link != links[0].1))
            .map(|(label, links)| LabelDrift { label, links })
            .collect();

        let group_drift = headings
            .items
            .into_iter()
            .filter_map(|(heading, mut present_in)| {
                present_in.dedup();
                (present_in.len() < copies.len()).then_some(GroupDrift {
                    heading,
                    present_in,
                })
            })
            .collect();

        let report = Self {
            label_drift,
            group_drift,
        };
        tracing::debug!(
            copies = copies.len(),
            labels = report.label_drift.len(),
            groups = report.group_drift.len(),
            "Drift comparison completed"
        );
        report
    }

    /// Number of drifting labels and groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.label_drift.len() + self.group_drift.len()
    }

    /// True when the copies agree.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.label_drift.is_empty() && self.group_drift.is_empty()
    }
}
