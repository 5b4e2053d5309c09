//! Facet derivation from the image collection.
//!
//! Categories are not stored independently: the facet set is the union of
//! every image's category labels over the current collection, headed by the
//! synthetic "All Work" facet that represents the unfiltered view. Facets
//! appear in first-seen order — the order is presentation-relevant and must
//! be stable across re-runs on the same input, so no sorting happens here.
//!
//! Counting invariants:
//!
//! - "All Work" counts every image exactly once, regardless of how many
//!   categories it carries.
//! - A label's count equals the number of images whose category set
//!   contains it (image categories are de-duplicated at the fetch boundary,
//!   so one image can never double-count within one facet).
//! - Facets only exist because some image put them there, so a zero-count
//!   facet can never appear in the list.

use crate::assets::category_slug;
use crate::model::Image;
use std::collections::{HashMap, HashSet};

/// Label of the synthetic facet representing the unfiltered collection.
pub const ALL_WORK: &str = "All Work";

/// A derived category with its member count.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Facet {
    pub label: String,
    pub count: usize,
}

/// The derived facet set plus a members index (image positions per label)
/// and the unique page slug assigned to each facet.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct CatalogIndex {
    facets: Vec<Facet>,
    members: HashMap<String, Vec<usize>>,
    slugs: HashMap<String, String>,
}

impl CatalogIndex {
    /// Facets in presentation order: "All Work" first, then first-seen.
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// Member count for a label; zero when the label is unknown.
    pub fn count(&self, label: &str) -> usize {
        self.facets
            .iter()
            .find(|f| f.label == label)
            .map_or(0, |f| f.count)
    }

    /// Positions (into the indexed collection) of a label's members.
    /// `None` for "All Work" and unknown labels.
    pub fn members(&self, label: &str) -> Option<&[usize]> {
        self.members.get(label).map(Vec::as_slice)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.facets.iter().any(|f| f.label == label)
    }

    /// Unique, stable page slug for a facet label. `None` for labels the
    /// index does not carry.
    pub fn slug(&self, label: &str) -> Option<&str> {
        self.slugs.get(label).map(String::as_str)
    }
}

/// Index a collection into its facet set. O(n·k) over n images with k
/// categories each; an image with no categories contributes only to
/// "All Work".
pub fn index(images: &[Image]) -> CatalogIndex {
    let mut facets = vec![Facet {
        label: ALL_WORK.to_string(),
        count: images.len(),
    }];
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut members: HashMap<String, Vec<usize>> = HashMap::new();

    for (i, image) in images.iter().enumerate() {
        for label in &image.categories {
            match positions.get(label) {
                Some(&pos) => facets[pos].count += 1,
                None => {
                    positions.insert(label.clone(), facets.len());
                    facets.push(Facet {
                        label: label.clone(),
                        count: 1,
                    });
                }
            }
            members.entry(label.clone()).or_default().push(i);
        }
    }

    // Slug assignment. Sanitized slugs are lossy ("Black & White" and
    // "Black-White" both sanitize to "black-white"; a symbol-only label
    // sanitizes to nothing), so distinct labels disambiguate with their
    // facet position. A sanitized slug never contains `--`, which keeps the
    // positional forms out of the sanitized namespace. First-seen order
    // makes the assignment stable for the same collection.
    let mut taken: HashSet<String> = HashSet::new();
    let mut slugs: HashMap<String, String> = HashMap::new();
    for (pos, facet) in facets.iter().enumerate() {
        let base = category_slug(&facet.label);
        let slug = if base.is_empty() {
            format!("category--{pos}")
        } else if taken.contains(&base) {
            format!("{base}--{pos}")
        } else {
            base
        };
        taken.insert(slug.clone());
        slugs.insert(facet.label.clone(), slug);
    }

    CatalogIndex {
        facets,
        members,
        slugs,
    }
}
